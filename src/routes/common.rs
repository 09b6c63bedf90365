//! Service routes outside the pet API: welcome text, liveness, readiness, build info.

use crate::error::AppError;
use crate::state::AppState;
use crate::store::{acquire, missing_tables};
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

pub const WELCOME_TEXT: &str = "Welcome to the Pet Adoption API!";

#[derive(Serialize)]
struct Liveness {
    status: &'static str,
}

#[derive(Serialize)]
struct Readiness {
    status: &'static str,
    database: &'static str,
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

async fn welcome() -> &'static str {
    WELCOME_TEXT
}

async fn health() -> Json<Liveness> {
    Json(Liveness { status: "ok" })
}

/// Ready once a connection can be checked out and both tables exist.
async fn ready(State(state): State<AppState>) -> Result<Json<Readiness>, AppError> {
    let mut conn = acquire(&state.pool).await?;
    let missing = missing_tables(&mut conn).await?;
    if !missing.is_empty() {
        tracing::warn!(?missing, "schema incomplete");
        return Err(AppError::Unavailable(format!(
            "missing tables: {}",
            missing.join(", ")
        )));
    }
    Ok(Json(Readiness {
        status: "ok",
        database: "ok",
    }))
}

async fn version() -> Json<BuildInfo> {
    Json(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
