//! Settings validation: run after loading, before anything touches storage.

use crate::config::types::Settings;
use crate::error::ConfigError;

pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if !settings.database_url.starts_with("sqlite:") {
        return Err(ConfigError::Validation(format!(
            "database url must use the sqlite: scheme, got '{}'",
            settings.database_url
        )));
    }
    if settings.upload_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation("upload directory must not be empty".into()));
    }
    if settings.max_upload_bytes == 0 {
        return Err(ConfigError::Validation("max upload bytes must be greater than zero".into()));
    }
    Ok(())
}
