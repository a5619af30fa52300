mod auth;
mod complaints;
mod dashboard;

pub use auth::{login, logout};
pub use complaints::{list_complaints, resolve_complaint, submit_complaint};
pub use dashboard::{executive_summary, overview, stats};

use axum::http::HeaderMap;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::AuthUser;
use crate::state::AppState;

pub(crate) const SESSION_HEADER: &str = "x-session-token";

/// Resolves the session token header to the authenticated identity.
pub(crate) fn current_user(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
    let token = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .ok_or(ApiError::Unauthorized)?;

    state.sessions.get(&token).ok_or(ApiError::Unauthorized)
}
