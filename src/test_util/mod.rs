//! Shared helpers for route and client tests.

pub mod mock_okta;

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheStore, MemoryCache};
use crate::config::{CacheBackend, Config};
use crate::okta::{OktaClient, RetryPolicy};
use crate::AppState;

pub fn test_config(okta_base_url: &str) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 8080,
        okta_org_url: Some(okta_base_url.to_string()),
        okta_api_token: Some("test-token".to_string()),
        cache_backend: CacheBackend::Memory,
        cache_ttl_seconds: 600,
        environment: "test".to_string(),
        log_level: "debug".to_string(),
    }
}

/// Millisecond-scale retry schedule so backoff tests finish quickly while
/// keeping the production bound of three retries.
pub fn fast_retry_policy() -> RetryPolicy {
    RetryPolicy {
        max_retries: 3,
        base_delay: Duration::from_millis(10),
    }
}

/// Assemble an [`AppState`] from explicit parts, with the fast retry
/// schedule injected.
pub fn build_state(config: Config, cache: Arc<dyn CacheStore>) -> Arc<AppState> {
    let okta_client = OktaClient::from_config(&config).with_retry_policy(fast_retry_policy());
    Arc::new(AppState {
        config,
        okta_client,
        cache,
    })
}

/// State pointed at `okta_base_url` with an in-process cache.
pub fn test_state(okta_base_url: &str) -> Arc<AppState> {
    build_state(test_config(okta_base_url), Arc::new(MemoryCache::new()))
}

/// State with no Okta credentials configured.
pub fn unconfigured_state() -> Arc<AppState> {
    let mut config = test_config("http://unused.invalid");
    config.okta_org_url = None;
    config.okta_api_token = None;
    build_state(config, Arc::new(MemoryCache::new()))
}
