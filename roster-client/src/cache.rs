//! Response cache with time-based expiry
//!
//! Owned by the [`RecordService`](crate::RecordService) and shared by its
//! clones. Entries expire by age and are evicted lazily when read; there is
//! no background sweep. Any create clears the whole cache.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: serde_json::Value,
    inserted_at: Instant,
}

/// 响应缓存
#[derive(Debug, Clone)]
pub struct ResponseCache {
    inner: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh cached value for `key`, if any
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        {
            let inner = self.inner.read().await;
            let entry = inner.get(key)?;
            if entry.inserted_at.elapsed() <= self.ttl {
                return match serde_json::from_value(entry.value.clone()) {
                    Ok(value) => {
                        tracing::debug!(key = %key, "Cache hit");
                        Some(value)
                    }
                    Err(e) => {
                        tracing::warn!(key = %key, error = %e, "Cached value has unexpected shape");
                        None
                    }
                };
            }
        }

        let mut inner = self.inner.write().await;
        // re-check: another task may have refreshed the entry meanwhile
        if inner
            .get(key)
            .is_some_and(|e| e.inserted_at.elapsed() > self.ttl)
        {
            inner.remove(key);
            tracing::debug!(key = %key, "Cache entry expired");
        }
        None
    }

    pub async fn insert<T: Serialize>(&self, key: impl Into<String>, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "Value not cacheable");
                return;
            }
        };
        let mut inner = self.inner.write().await;
        inner.insert(
            key.into(),
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drop every entry
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        let count = inner.len();
        inner.clear();
        tracing::debug!(count, "Cache cleared");
    }

    /// Number of stored entries, expired ones included until read
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    #[tokio::test(start_paused = true)]
    async fn test_hit_within_ttl() {
        let cache = ResponseCache::new(TTL);
        cache.insert("departments:all", &vec!["Lending"]).await;

        tokio::time::advance(Duration::from_secs(299)).await;
        let hit: Option<Vec<String>> = cache.get("departments:all").await;
        assert_eq!(hit, Some(vec!["Lending".to_string()]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_evicted_on_read() {
        let cache = ResponseCache::new(TTL);
        cache.insert("locations:all", &vec!["Depok"]).await;

        tokio::time::advance(Duration::from_secs(301)).await;
        // still stored until someone looks at it
        assert_eq!(cache.len().await, 1);

        let miss: Option<Vec<String>> = cache.get("locations:all").await;
        assert!(miss.is_none());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = ResponseCache::new(TTL);
        cache.insert("a", &1u32).await;
        cache.insert("b", &2u32).await;
        cache.clear().await;
        assert!(cache.is_empty().await);
        assert!(cache.get::<u32>("a").await.is_none());
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_a_miss() {
        let cache = ResponseCache::new(TTL);
        cache.insert("k", &"text").await;
        assert!(cache.get::<Vec<u32>>("k").await.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = ResponseCache::new(TTL);
        let other = cache.clone();
        cache.insert("k", &5u32).await;
        assert_eq!(other.get::<u32>("k").await, Some(5));
    }
}
