use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::Role;
use crate::sessions::{authenticate, LoginRequest};
use crate::state::AppState;

use super::SESSION_HEADER;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub name: String,
    pub role: Role,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = authenticate(&request, &state.roster, &state.config)?;
    info!(role = %user.role, name = %user.name, "session opened");

    let token = state.sessions.create(user.clone());
    Ok(Json(LoginResponse {
        token: token.to_string(),
        name: user.name,
        role: user.role,
    }))
}

/// Discards the session. Idempotent; has no effect on the complaint store.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    if let Some(token) = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
    {
        if state.sessions.remove(&token) {
            info!("session closed");
        }
    }
    Json(serde_json::json!({ "ok": true }))
}
