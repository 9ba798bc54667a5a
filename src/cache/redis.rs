use async_trait::async_trait;
use serde_json::Value;

use super::{CacheError, CacheStore};

/// Placeholder for a shared external cache.
///
/// Every operation fails with [`CacheError::NotImplemented`] so a
/// misconfigured deployment is loud about it instead of silently serving
/// uncached traffic.
#[derive(Default)]
pub struct RedisCache;

impl RedisCache {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, _key: &str) -> Result<Option<Value>, CacheError> {
        Err(CacheError::NotImplemented)
    }

    async fn set(&self, _key: &str, _value: Value, _ttl_seconds: u64) -> Result<(), CacheError> {
        Err(CacheError::NotImplemented)
    }

    async fn clear(&self) -> Result<(), CacheError> {
        Err(CacheError::NotImplemented)
    }
}
