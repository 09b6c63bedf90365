//! Pet, adoption request, and upload routes.

use crate::handlers::{adoptions, pets, uploads};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/pets", get(pets::list))
        .route("/pets/:id", get(pets::read).delete(pets::delete))
        .route("/add_pet", post(pets::create))
        .route("/adopt_pet/:id", put(pets::adopt))
        .route("/adoptions", get(adoptions::list).post(adoptions::create))
        .route("/uploads", post(uploads::upload))
        .route("/uploads/:filename", get(uploads::serve))
        .with_state(state)
}
