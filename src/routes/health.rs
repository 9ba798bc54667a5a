use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    status: u16,
    timestamp: String,
    environment: String,
    version: &'static str,
    cache: &'static str,
}

/// GET /health - liveness probe. Reports build and configuration info and
/// never touches Okta.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        status: 200,
        timestamp: Utc::now().to_rfc3339(),
        environment: state.config.environment.clone(),
        version: env!("CARGO_PKG_VERSION"),
        cache: state.config.cache_backend.as_str(),
    })
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}
