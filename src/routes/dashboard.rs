use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{AiSummary, Category, Role};
use crate::state::AppState;
use crate::stats::{self, CategoryStats, ScopeStats};
use crate::visibility::{visible, Scope};

use super::current_user;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: ScopeStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_target: Option<bool>,
}

/// Dashboard header figures for the session's visible set. Incharges and
/// HODs also get the latency target for their portfolio (HODs are measured
/// against the Faculty target, as the original portal does).
pub async fn stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<StatsResponse>, ApiError> {
    let user = current_user(&state, &headers)?;
    let scope = Scope::for_user(&user);

    let complaints = visible(&state.store.snapshot(), &scope);
    let stats = stats::scope_stats(&complaints);

    let target = match scope {
        Scope::Category(category) => Some(category.target_hours()),
        Scope::Department(_) => Some(Category::Faculty.target_hours()),
        _ => None,
    };

    Ok(Json(StatsResponse {
        meeting_target: target.map(|t| stats.avg_resolution_hours <= t),
        target_hours: target,
        stats,
    }))
}

/// Per-category buckets over the unfiltered store; executive only.
pub async fn overview(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<CategoryStats>>, ApiError> {
    let user = current_user(&state, &headers)?;
    if user.role != Role::ViceChancellor {
        return Err(ApiError::Forbidden(
            "The executive overview is restricted to the Vice Chancellor".to_string(),
        ));
    }

    Ok(Json(stats::overview(&state.store.snapshot())))
}

/// AI executive brief over the full complaint set; executive only. Always
/// answers 200 — the adapter substitutes its fallback on any failure.
pub async fn executive_summary(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<AiSummary>, ApiError> {
    let user = current_user(&state, &headers)?;
    if user.role != Role::ViceChancellor {
        return Err(ApiError::Forbidden(
            "The executive brief is restricted to the Vice Chancellor".to_string(),
        ));
    }

    let complaints = state.store.snapshot();
    let summary = state.summarizer.generate_summary(&complaints).await;
    Ok(Json(summary))
}
