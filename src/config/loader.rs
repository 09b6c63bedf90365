//! Load settings from the process environment or from an injected lookup.

use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const ENV_DEBUG: &str = "DEBUG";
/// Accepted as a fallback for `DEBUG` so existing deployments keep their switch.
pub const ENV_DEBUG_LEGACY: &str = "FLASK_DEBUG";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_UPLOAD_DIR: &str = "UPLOAD_DIR";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_MAX_UPLOAD_BYTES: &str = "MAX_UPLOAD_BYTES";

/// Read settings from `std::env`, after loading a `.env` file from the working
/// directory if present.
pub fn from_env() -> Result<Settings, ConfigError> {
    dotenvy::dotenv().ok();
    from_lookup(|key| std::env::var(key).ok())
}

/// Build settings from any key lookup, then validate them. Unset or blank keys fall
/// back to defaults.
pub fn from_lookup<F>(lookup: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let defaults = Settings::default();

    let debug_flag = get(ENV_DEBUG)
        .map(|v| (ENV_DEBUG, v))
        .or_else(|| get(ENV_DEBUG_LEGACY).map(|v| (ENV_DEBUG_LEGACY, v)));
    let debug = match debug_flag {
        Some((key, v)) => parse_bool(key, &v)?,
        None => defaults.debug,
    };

    let database_url = get(ENV_DATABASE_URL).unwrap_or(defaults.database_url);
    let upload_dir = get(ENV_UPLOAD_DIR).map(PathBuf::from).unwrap_or(defaults.upload_dir);

    let bind_addr = match get(ENV_BIND_ADDR) {
        Some(v) => v.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            key: ENV_BIND_ADDR,
            value: v.clone(),
            reason: e.to_string(),
        })?,
        None => defaults.bind_addr,
    };

    let max_upload_bytes = match get(ENV_MAX_UPLOAD_BYTES) {
        Some(v) => v.parse::<usize>().map_err(|e| ConfigError::Invalid {
            key: ENV_MAX_UPLOAD_BYTES,
            value: v.clone(),
            reason: e.to_string(),
        })?,
        None => defaults.max_upload_bytes,
    };

    let settings = Settings {
        debug,
        database_url,
        upload_dir,
        bind_addr,
        max_upload_bytes,
    };
    validate(&settings)?;
    Ok(settings)
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "expected a boolean".into(),
        }),
    }
}
