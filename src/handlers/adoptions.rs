//! Adoption request handlers.

use crate::error::AppError;
use crate::handlers::body_to_map;
use crate::response::{self, Ack};
use crate::service::{AdoptionService, RequestValidator};
use crate::state::AppState;
use crate::store::acquire;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Debug, Default)]
pub struct AdoptionFilter {
    pub pet_id: Option<i64>,
}

/// GET /adoptions?pet_id=
pub async fn list(
    State(state): State<AppState>,
    filter: Result<Query<AdoptionFilter>, QueryRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let Query(filter) = filter?;
    let mut conn = acquire(&state.pool).await?;
    let rows = AdoptionService::list(&mut conn, filter.pet_id).await?;
    Ok(Json(rows))
}

/// POST /adoptions
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let Json(body) = payload?;
    let body = body_to_map(body)?;
    let req = RequestValidator::new_adoption(&body)?;
    let mut conn = acquire(&state.pool).await?;
    let id = AdoptionService::create(&mut conn, &req).await?;
    tracing::info!(id, pet_id = req.pet_id, "adoption request submitted");
    Ok(response::created(
        Ack::new(format!(
            "Adoption request {} submitted for pet {}!",
            id, req.pet_id
        ))
        .with_id(id),
    ))
}
