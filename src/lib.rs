pub mod cache;
pub mod config;
pub mod logging;
pub mod models;
pub mod okta;
pub mod routes;
pub mod test_util;

pub use cache::{CacheError, CacheStore, MemoryCache, RedisCache};
pub use config::{CacheBackend, Config};
pub use models::{ApiResponse, ResponseMeta, SearchResult, User};
pub use okta::{OktaClient, OktaError, RetryPolicy};

use std::sync::Arc;

/// Shared application state.
///
/// Constructed once in `main` and handed to every route; the cache is the
/// only piece mutated across requests.
pub struct AppState {
    pub config: Config,
    pub okta_client: OktaClient,
    pub cache: Arc<dyn CacheStore>,
}
