use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{CacheError, CacheStore};

struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// In-process cache backed by a mutex-guarded map.
///
/// Entries expire by TTL only; there is no capacity bound and no background
/// sweep. Concurrent writers are last-writer-wins, which is fine for this
/// workload: a racing duplicate upstream fetch corrects itself.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        let mut entries = self.entries.lock().await;
        let Some(entry) = entries.get(key) else {
            return Ok(None);
        };
        if Instant::now() <= entry.expires_at {
            return Ok(Some(entry.value.clone()));
        }
        // Lazy eviction: the read that finds a stale entry deletes it.
        entries.remove(key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: Value, ttl_seconds: u64) -> Result<(), CacheError> {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
        };
        self.entries.lock().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.entries.lock().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = MemoryCache::new();
        cache.set("k", json!({"v": 1}), 60).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some(json!({"v": 1})));
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_entry_is_evicted_on_read() {
        let cache = MemoryCache::new();
        // Zero TTL expires before the next read.
        cache.set("k", json!("v"), 0).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(cache.entries.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_entry() {
        let cache = MemoryCache::new();
        cache.set("k", json!(1), 60).await.unwrap();
        cache.set("k", json!(2), 60).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some(json!(2)));
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let cache = MemoryCache::new();
        cache.set("a", json!(1), 60).await.unwrap();
        cache.set("b", json!(2), 60).await.unwrap();
        cache.clear().await.unwrap();
        assert_eq!(cache.get("a").await.unwrap(), None);
        assert_eq!(cache.get("b").await.unwrap(), None);
    }
}
