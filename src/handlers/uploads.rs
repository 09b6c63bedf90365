//! Pet image upload and download, confined to the configured upload directory.

use crate::error::AppError;
use crate::response::{self, Ack};
use crate::state::AppState;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::header;
use regex::Regex;
use std::io::ErrorKind;
use std::sync::OnceLock;

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

fn filename_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9._ -]+$").expect("filename pattern compiles"))
}

/// A bare file name that cannot escape the upload directory: no separators,
/// no `..`, no leading dot, only `[A-Za-z0-9._ -]`.
pub fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains("..")
        && filename_regex().is_match(name)
}

fn extension(name: &str) -> Option<String> {
    name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase())
}

fn content_type_for(name: &str) -> &'static str {
    match extension(name).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// GET /uploads/:filename. Unsafe names are reported as not found.
pub async fn serve(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if !is_safe_filename(&filename) {
        tracing::warn!(filename = %filename, "rejected upload path");
        return Err(AppError::NotFound(format!("file {}", filename)));
    }
    let path = state.settings.upload_dir.join(&filename);
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("file {}", filename)));
        }
        Err(e) => return Err(AppError::Io(e)),
    };
    Ok(([(header::CONTENT_TYPE, content_type_for(&filename))], bytes))
}

/// POST /uploads: multipart form with a `file` field. Saved under its original name;
/// an existing file with the same name is overwritten.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let mut multipart = multipart?;
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest("'file' field has no filename".into()))?;
        let data = field.bytes().await?;
        upload = Some((filename, data.to_vec()));
        break;
    }
    let (filename, data) = upload.ok_or_else(|| AppError::MissingField("file".into()))?;

    if !is_safe_filename(&filename) {
        tracing::warn!(filename = %filename, "rejected upload name");
        return Err(AppError::Validation(format!("invalid file name '{}'", filename)));
    }
    match extension(&filename) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => {}
        _ => {
            tracing::warn!(filename = %filename, "rejected upload type");
            return Err(AppError::Validation(format!(
                "file type not allowed; expected one of: {}",
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }
    }

    tokio::fs::create_dir_all(&state.settings.upload_dir).await?;
    tokio::fs::write(state.settings.upload_dir.join(&filename), &data).await?;
    tracing::info!(filename = %filename, bytes = data.len(), "image uploaded");
    Ok(response::created(
        Ack::new(format!("File {} uploaded successfully!", filename))
            .with_path(format!("uploads/{}", filename)),
    ))
}
