mod agents;
mod config;
mod error;
mod models;
mod roster;
mod routes;
mod sessions;
mod state;
mod stats;
mod store;
mod visibility;

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edugrievance=info,tower_http=info".into()),
        )
        .init();

    let config = Arc::new(config::Config::from_env()?);
    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set; executive briefs will use the fallback summary");
    }

    let state = Arc::new(state::AppState {
        store: store::ComplaintStore::seeded(),
        roster: roster::Roster::preloaded(),
        sessions: sessions::SessionRegistry::new(),
        summarizer: agents::GeminiAgent::new(config.gemini_api_key.clone()),
        config: config.clone(),
    });

    let app = Router::new()
        .route("/api/login", post(routes::login))
        .route("/api/logout", post(routes::logout))
        .route(
            "/api/complaints",
            get(routes::list_complaints).post(routes::submit_complaint),
        )
        .route("/api/complaints/:id/resolve", post(routes::resolve_complaint))
        .route("/api/stats", get(routes::stats))
        .route("/api/overview", get(routes::overview))
        .route("/api/summary", get(routes::executive_summary))
        // Image attachments are bounded at 5 MB; leave headroom for the
        // multipart framing and text fields.
        .layer(DefaultBodyLimit::max(8 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("EduGrievance portal listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
