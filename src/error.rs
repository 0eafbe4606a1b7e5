use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Domain errors surfaced by the auth service.
///
/// Every variant maps to a caller-facing `{"error": "..."}` body; only
/// `Internal` hides its detail behind a generic message.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Failed to send verification email")]
    Notification,

    #[error("User not found")]
    NotFound,

    #[error("Email already verified")]
    AlreadyVerified,

    #[error("Invalid verification code")]
    CodeInvalid,

    #[error("Verification code has expired")]
    CodeExpired,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Please verify your email before logging in")]
    UnverifiedAccount,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::DuplicateEmail => StatusCode::CONFLICT,
            AuthError::Notification => StatusCode::BAD_GATEWAY,
            AuthError::NotFound => StatusCode::NOT_FOUND,
            AuthError::AlreadyVerified => StatusCode::CONFLICT,
            AuthError::CodeInvalid | AuthError::CodeExpired => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::UnverifiedAccount => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match &self {
            // Full fault detail stays in the server log only.
            AuthError::Internal(e) => {
                error!(error = ?e, "internal error");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };
        (self.status(), Json(json!({ "error": message }))).into_response()
    }
}
