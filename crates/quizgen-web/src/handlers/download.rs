use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;

use crate::error::ApiError;
use crate::state::AppState;

/// Serve a result artifact as an attachment. Names with path separators
/// or parent components are rejected before touching the filesystem.
/// Interior dot runs stay legal: sanitized uploads keep them, so minted
/// artifact names like `mcqs_report..txt` must resolve.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if filename.contains('/') || filename.contains('\\') || filename == ".." {
        return Err(ApiError::InvalidFilename);
    }

    let path = state.config.results_dir.join(&filename);
    let data = match tokio::fs::read(&path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(ApiError::NotFound),
        Err(e) => return Err(ApiError::Internal(format!("Failed to read file: {}", e))),
    };

    let content_type = match path.extension().and_then(|e| e.to_str()) {
        Some("txt") => "text/plain; charset=utf-8",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    };

    tracing::debug!(file = %filename, bytes = data.len(), "serving download");

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        data,
    ))
}
