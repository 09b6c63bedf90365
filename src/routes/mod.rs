//! Router assembly: common and API routes behind CORS, request tracing, and a body size cap.

mod api;
mod common;

pub use api::api_routes;
pub use common::{common_routes, WELCOME_TEXT};

use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Full application router. The UI runs on another origin, so any origin is allowed.
///
/// The body cap is enforced by the JSON and multipart extractors, so an oversized
/// body is answered with the usual JSON error envelope (413 `payload_too_large`).
pub fn app(state: AppState) -> Router {
    let max_body = state.settings.max_upload_bytes;
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state))
        .layer(DefaultBodyLimit::max(max_body))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
