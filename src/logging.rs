use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Middleware that logs every HTTP request; server errors log at WARN so
/// they stand out at the default filter level.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        tracing::warn!(%method, path, status, latency_ms, "HTTP request failed");
    } else {
        tracing::info!(%method, path, status, latency_ms, "HTTP request");
    }

    response
}
