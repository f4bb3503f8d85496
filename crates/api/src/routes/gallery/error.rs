use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("failed to remove stored media")]
    Storage(#[from] std::io::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

fn log_error(error: &GalleryError) {
    match error {
        GalleryError::Unauthorized => warn!("Gallery operation rejected: unauthorized"),
        GalleryError::Database(e) => error!("Database query failed: {}", e),
        GalleryError::Storage(e) => error!("Stored media file operation failed: {}", e),
        GalleryError::Internal(e) => error!("Internal error: {:?}", e),
    }
}

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
            ),
            Self::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to remove stored media.".to_string(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected internal error occurred.".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
