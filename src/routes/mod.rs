//! HTTP routes.

pub mod health;
pub mod people;
pub mod ping;

use std::sync::Arc;

use axum::Router;

use crate::AppState;

/// Build the full route surface.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router(state.clone()))
        .merge(ping::router(state.clone()))
        .merge(people::router(state))
}
