//! SQLite pool setup and `pets` / `adoptions` DDL.
//!
//! The pool is a connection factory: handlers call [`acquire`] per request and the
//! returned guard hands the connection back when it drops, on every exit path.

use crate::error::AppError;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection};
use std::str::FromStr;

const MAX_CONNECTIONS: u32 = 5;

const PETS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS pets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        type TEXT NOT NULL,
        breed TEXT NOT NULL DEFAULT '',
        age INTEGER NOT NULL CHECK (age >= 0),
        gender TEXT NOT NULL CHECK (gender IN ('Male', 'Female')),
        size TEXT NOT NULL,
        weight INTEGER NOT NULL CHECK (weight >= 0),
        color TEXT NOT NULL,
        vaccinated TEXT NOT NULL CHECK (vaccinated IN ('Yes', 'No')),
        personality TEXT NOT NULL,
        training TEXT NOT NULL DEFAULT '',
        compatibility_pets TEXT NOT NULL DEFAULT '',
        compatibility_kids TEXT NOT NULL DEFAULT '',
        special_needs TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL DEFAULT 'Available' CHECK (status IN ('Available', 'Adopted')),
        image TEXT NOT NULL
    )
"#;

const ADOPTIONS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS adoptions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT NOT NULL,
        address TEXT NOT NULL,
        pet_id INTEGER NOT NULL REFERENCES pets(id) ON DELETE CASCADE,
        status TEXT NOT NULL DEFAULT 'Pending' CHECK (status IN ('Pending', 'Approved', 'Rejected'))
    )
"#;

/// Open a pool on `database_url`, creating the database file if it does not exist.
/// Foreign keys are enabled on every connection so cascades fire.
pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
        .map_err(AppError::unavailable)?;
    tracing::info!(database_url = %database_url, "database opened");
    Ok(pool)
}

/// Create `pets` then `adoptions` if absent. Safe to run on every startup.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), AppError> {
    let mut conn = acquire(pool).await?;
    for ddl in [PETS_DDL, ADOPTIONS_DDL] {
        sqlx::query(ddl).execute(&mut *conn).await?;
    }
    tracing::info!("storage schema ready");
    Ok(())
}

/// Tables this service needs, in creation order.
pub const TABLES: [&str; 2] = ["pets", "adoptions"];

/// Names from [`TABLES`] that are not present in the database.
pub async fn missing_tables(conn: &mut SqliteConnection) -> Result<Vec<&'static str>, AppError> {
    let present: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table'")
            .fetch_all(conn)
            .await?;
    Ok(TABLES
        .into_iter()
        .filter(|table| !present.iter().any(|name| name == table))
        .collect())
}

/// Check out one connection for the duration of a request.
pub async fn acquire(pool: &SqlitePool) -> Result<PoolConnection<Sqlite>, AppError> {
    pool.acquire().await.map_err(AppError::unavailable)
}
