use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("username is already taken")]
    UsernameTaken,

    #[error("missing session")]
    MissingSession,

    #[error("invalid or expired session")]
    InvalidSession,

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

fn log_error(error: &AuthError) {
    match error {
        AuthError::InvalidCredentials => warn!("Login rejected: invalid credentials"),
        AuthError::UsernameTaken => warn!("Registration rejected: username taken"),
        AuthError::MissingSession | AuthError::InvalidSession => {}
        AuthError::Database(e) => error!("Database query failed: {}", e),
        AuthError::Internal(e) => error!("Internal error: {:?}", e),
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            Self::UsernameTaken => (
                StatusCode::CONFLICT,
                "Username is already taken".to_string(),
            ),
            Self::MissingSession | Self::InvalidSession => {
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
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
