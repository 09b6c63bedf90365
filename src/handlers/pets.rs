//! Pet handlers: list, read, add, adopt, delete.

use crate::error::AppError;
use crate::handlers::body_to_map;
use crate::response::{self, Ack};
use crate::service::{parse_id, PetService, RequestValidator};
use crate::state::AppState;
use crate::store::acquire;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

/// GET /pets
pub async fn list(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let mut conn = acquire(&state.pool).await?;
    let pets = PetService::list(&mut conn).await?;
    Ok(Json(pets))
}

/// GET /pets/:id
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let mut conn = acquire(&state.pool).await?;
    let pet = PetService::read(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("pet {}", id)))?;
    Ok(Json(pet))
}

/// POST /add_pet. Status is always stored as `Available`, whatever the body says.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let Json(body) = payload?;
    let body = body_to_map(body)?;
    let pet = RequestValidator::new_pet(&body)?;
    let mut conn = acquire(&state.pool).await?;
    let id = PetService::create(&mut conn, &pet).await?;
    tracing::info!(id, name = %pet.name, "pet added");
    Ok(response::created(
        Ack::new(format!("Pet {} added successfully!", pet.name)).with_id(id),
    ))
}

/// PUT /adopt_pet/:id. Adopting an already adopted pet succeeds again.
pub async fn adopt(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let mut conn = acquire(&state.pool).await?;
    if !PetService::adopt(&mut conn, id).await? {
        return Err(AppError::NotFound(format!("pet {}", id)));
    }
    tracing::info!(id, "pet adopted");
    Ok(response::ok(
        Ack::new(format!("Pet ID {} has been adopted!", id)).with_id(id),
    ))
}

/// DELETE /pets/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let mut conn = acquire(&state.pool).await?;
    if !PetService::delete(&mut conn, id).await? {
        return Err(AppError::NotFound(format!("pet {}", id)));
    }
    tracing::info!(id, "pet deleted");
    Ok(response::ok(
        Ack::new(format!("Pet ID {} has been deleted!", id)).with_id(id),
    ))
}
