use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use quizgen_core::{GenerationError, WriteError};

/// Handler failures mapped onto HTTP responses. The 400-class reason
/// strings are part of the observable contract and must stay stable.
#[derive(Debug)]
pub enum ApiError {
    /// The multipart form carried no usable `file` part.
    NoFileUploaded,
    /// Final extension not in the configured allow-list.
    InvalidFileFormat,
    /// Extraction failed or produced no text.
    ExtractionFailed,
    /// `num_questions` missing, unparsable, or below 1.
    InvalidQuestionCount,
    /// Download target contained path separators or `..`.
    InvalidFilename,
    /// Download target does not exist.
    NotFound,
    /// The multipart stream itself could not be read.
    Multipart(String),
    /// Persisting the upload to disk failed.
    SaveUpload(std::io::Error),
    /// The generation backend reported an error.
    Generation(GenerationError),
    /// Writing a result artifact failed.
    Artifact(WriteError),
    /// A blocking task failed to join or another internal fault.
    Internal(String),
}

impl From<GenerationError> for ApiError {
    fn from(e: GenerationError) -> Self {
        ApiError::Generation(e)
    }
}

impl From<WriteError> for ApiError {
    fn from(e: WriteError) -> Self {
        ApiError::Artifact(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NoFileUploaded => {
                (StatusCode::BAD_REQUEST, "No file uploaded").into_response()
            }
            ApiError::InvalidFileFormat => {
                (StatusCode::BAD_REQUEST, "Invalid file format").into_response()
            }
            ApiError::ExtractionFailed => {
                (StatusCode::BAD_REQUEST, "Failed to extract text").into_response()
            }
            ApiError::InvalidQuestionCount => {
                (StatusCode::BAD_REQUEST, "Invalid number of questions").into_response()
            }
            ApiError::InvalidFilename => {
                (StatusCode::BAD_REQUEST, "Invalid filename").into_response()
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, "File not found").into_response(),
            ApiError::Multipart(msg) => {
                (StatusCode::BAD_REQUEST, format!("Failed to read form: {}", msg)).into_response()
            }
            ApiError::SaveUpload(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to save upload: {}", e),
            )
                .into_response(),
            ApiError::Generation(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Generation failed: {}", e),
            )
                .into_response(),
            ApiError::Artifact(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to write results: {}", e),
            )
                .into_response(),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response()
            }
        }
    }
}
