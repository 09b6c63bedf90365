//! Pet adoption service: REST backend over a SQLite `pets` / `adoptions` store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{from_env, Settings};
pub use error::{AppError, ConfigError};
pub use model::{
    AdoptionRequest, AdoptionStatus, Gender, NewAdoptionRequest, NewPet, Pet, PetStatus, Vaccinated,
};
pub use response::Ack;
pub use routes::{api_routes, app, common_routes};
pub use service::{AdoptionService, PetService};
pub use state::AppState;
pub use store::{acquire, connect, ensure_tables};
