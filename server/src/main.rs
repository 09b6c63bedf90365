//! Pet adoption server: reads settings from the environment (and `.env`), prepares
//! storage and the upload directory, then serves the API.
//!
//! Run from repo root: `cargo run -p server`

use pet_adoption::{app, connect, ensure_tables, from_env, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.default_log_directive())),
        )
        .init();

    tokio::fs::create_dir_all(&settings.upload_dir).await?;
    let pool = connect(&settings.database_url).await?;
    ensure_tables(&pool).await?;

    let bind_addr = settings.bind_addr;
    tracing::info!(debug = settings.debug, upload_dir = %settings.upload_dir.display(), "starting");
    let state = AppState::new(pool, settings);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
