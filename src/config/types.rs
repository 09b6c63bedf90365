//! Runtime settings for the adoption service.

use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://pets.db";
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Debug serving mode: verbose logging for the whole process.
    pub debug: bool,
    /// SQLite connection string; the file is created when missing.
    pub database_url: String,
    /// Directory holding uploaded pet images.
    pub upload_dir: PathBuf,
    pub bind_addr: SocketAddr,
    /// Request body cap, applied to JSON and multipart bodies alike.
    pub max_upload_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            debug: false,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Settings {
    /// Default tracing directive for this settings profile; `RUST_LOG` takes precedence.
    pub fn default_log_directive(&self) -> &'static str {
        if self.debug {
            "pet_adoption=debug,server=debug,tower_http=debug"
        } else {
            "pet_adoption=info,server=info"
        }
    }
}
