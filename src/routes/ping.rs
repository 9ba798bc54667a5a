use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::AppState;

const PING_CACHE_KEY: &str = "okta-ping";
const PING_CACHE_TTL_SECONDS: u64 = 60;

/// Upstream reachability report. Cached as-is, so a cached hit replays the
/// latency measured when the entry was written (a deliberate trade-off:
/// liveness is cache-bounded, not real-time).
#[derive(Debug, Serialize, Deserialize)]
pub struct PingResponse {
    pub ok: bool,
    pub status: u16,
    pub latency: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /okta/ping - one live `limit=1` Okta call, successes cached for a
/// minute, failures never cached.
async fn okta_ping(State(state): State<Arc<AppState>>) -> (StatusCode, Json<PingResponse>) {
    let cached = match state.cache.get(PING_CACHE_KEY).await {
        Ok(cached) => cached,
        Err(err) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PingResponse {
                    ok: false,
                    status: 500,
                    latency: 0,
                    error: Some(err.to_string()),
                }),
            );
        }
    };
    if let Some(value) = cached {
        if let Ok(result) = serde_json::from_value::<PingResponse>(value) {
            return (StatusCode::OK, Json(result));
        }
    }

    let start = Instant::now();
    match state.okta_client.fetch_users_with_retry(None, 1, None).await {
        Ok(_) => {
            let result = PingResponse {
                ok: true,
                status: 200,
                latency: start.elapsed().as_millis() as u64,
                error: None,
            };
            match serde_json::to_value(&result) {
                Ok(value) => {
                    if let Err(err) = state
                        .cache
                        .set(PING_CACHE_KEY, value, PING_CACHE_TTL_SECONDS)
                        .await
                    {
                        tracing::warn!(error = %err, "Failed to cache ping result");
                    }
                }
                Err(err) => tracing::warn!(error = %err, "Failed to serialize ping result"),
            }
            (StatusCode::OK, Json(result))
        }
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(PingResponse {
                ok: false,
                status: 500,
                latency: start.elapsed().as_millis() as u64,
                error: Some(err.to_string()),
            }),
        ),
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/okta/ping", get(okta_ping))
        .with_state(state)
}
