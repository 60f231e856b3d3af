//! In-memory cache implementation using the moka crate.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use petrodesk_core::config::cache::MemoryCacheConfig;
use petrodesk_core::result::AppResult;
use petrodesk_core::traits::cache::CacheProvider;

/// In-memory cache provider using moka.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, String>,
    /// Default TTL for entries.
    default_ttl: Duration,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .build();

        Self {
            cache,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.cache
            .insert_with_ttl(key.to_string(), value.to_string(), ttl)
            .await;
        Ok(())
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.set(key, value, self.default_ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.contains_key(key))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn flush_all(&self) -> AppResult<()> {
        let count = self.cache.entry_count();
        self.cache.invalidate_all();
        debug!(count, "Flushed in-memory cache");
        Ok(())
    }
}

/// Extension trait for moka::Cache to insert with TTL.
trait CacheExt {
    fn insert_with_ttl(
        &self,
        key: String,
        value: String,
        ttl: Duration,
    ) -> impl std::future::Future<Output = ()> + Send;
}

impl CacheExt for Cache<String, String> {
    async fn insert_with_ttl(&self, key: String, value: String, _ttl: Duration) {
        // moka sets TTL at cache level, not per-entry in the simple API;
        // entries expire on the TTL fixed at construction time.
        self.insert(key, value).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> MemoryCacheProvider {
        MemoryCacheProvider::new(&MemoryCacheConfig::default(), 60)
    }

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = provider();
        cache.set_default("k", "v").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("v"));
        assert!(cache.exists("k").await.unwrap());

        cache.delete("k").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_absent_key_is_noop() {
        let cache = provider();
        cache.delete("missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_json_round_trip() {
        let cache = provider();
        cache
            .set_json("list", &vec![1u32, 2, 3], Duration::from_secs(60))
            .await
            .unwrap();
        let out: Option<Vec<u32>> = cache.get_json("list").await.unwrap();
        assert_eq!(out, Some(vec![1, 2, 3]));
    }
}
