//! Pluggable response cache with per-entry TTL.
//!
//! The in-process backend is the default and the only working one. The
//! redis backend is a placeholder that fails every call until a real client
//! is wired in; a single-instance deployment does not need it, multiple
//! instances behind a load balancer will.

mod memory;
mod redis;

pub use memory::MemoryCache;
pub use redis::RedisCache;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::CacheBackend;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis cache not yet implemented - set CACHE_BACKEND=memory")]
    NotImplemented,
}

/// Key-value store with per-entry TTL. Values are JSON so callers can cache
/// whole response payloads without the store knowing their shape.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up `key`. Absent or expired entries yield `None`; an expired
    /// entry is evicted by the read that finds it.
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;

    /// Store `value` under `key` for `ttl_seconds`, unconditionally
    /// overwriting any existing entry.
    async fn set(&self, key: &str, value: Value, ttl_seconds: u64) -> Result<(), CacheError>;

    /// Drop all entries.
    async fn clear(&self) -> Result<(), CacheError>;
}

/// Build the cache selected by configuration. Called once at startup; the
/// choice is process-wide.
pub fn create_cache(backend: CacheBackend) -> Arc<dyn CacheStore> {
    match backend {
        CacheBackend::Memory => Arc::new(MemoryCache::new()),
        CacheBackend::Redis => Arc::new(RedisCache::new()),
    }
}
