use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use thiserror::Error;

/// Application error taxonomy. Every variant has a defined, non-crashing
/// recovery: login and validation failures surface as user-visible messages,
/// and the AI summary adapter substitutes a fallback instead of erroring.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Credentials mismatch. Verify Admission ID and Roll No.")]
    CredentialMismatch,

    #[error("{0}")]
    Validation(String),

    #[error("Session token missing or expired")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Complaint {0} is already resolved")]
    AlreadyResolved(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            ApiError::CredentialMismatch | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::AlreadyResolved(_) => StatusCode::CONFLICT,
        };

        let body = Json(serde_json::json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
