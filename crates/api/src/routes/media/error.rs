use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("missing photo id")]
    MissingId,

    #[error("photo not found")]
    NotFound,

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

fn log_error(error: &MediaError) {
    match error {
        MediaError::MissingId => debug!("Media fetch rejected: missing photo id"),
        MediaError::NotFound => debug!("Media fetch: photo not found or not visible"),
        MediaError::Database(e) => error!("Database query failed: {}", e),
        MediaError::Internal(e) => error!("Internal error: {:?}", e),
    }
}

impl IntoResponse for MediaError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::MissingId => (StatusCode::BAD_REQUEST, "A photo id is required.".to_string()),
            Self::NotFound => (StatusCode::NOT_FOUND, "Photo not found.".to_string()),
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
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
