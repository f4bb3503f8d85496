use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("missing date list")]
    MissingDates,

    #[error("invalid multipart body")]
    InvalidBody(#[from] MultipartError),

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("failed to store uploaded file")]
    Io(#[from] std::io::Error),

    #[error("media processing failed")]
    Processing(#[from] eyre::Report),
}

fn log_error(error: &UploadError) {
    match error {
        UploadError::MissingDates => warn!("Upload rejected: missing date list"),
        UploadError::InvalidBody(e) => warn!("Upload rejected: invalid multipart body: {}", e),
        UploadError::Database(e) => error!("Database query failed: {}", e),
        UploadError::Io(e) => error!("Failed to store uploaded file: {}", e),
        UploadError::Processing(e) => error!("Media processing failed: {:?}", e),
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::MissingDates => (
                StatusCode::BAD_REQUEST,
                "A date per uploaded file is required.".to_string(),
            ),
            Self::InvalidBody(_) => (
                StatusCode::BAD_REQUEST,
                "Invalid multipart body.".to_string(),
            ),
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
            ),
            Self::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to store the uploaded file.".to_string(),
            ),
            Self::Processing(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to process the uploaded media.".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<tokio::task::JoinError> for UploadError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Processing(eyre::Report::new(err))
    }
}
