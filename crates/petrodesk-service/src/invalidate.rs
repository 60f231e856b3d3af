//! Cache invalidation helpers.
//!
//! Every employee mutation, including every folder and document change,
//! drops BOTH the entity key and the list key; a mutated aggregate must
//! never be served stale from either. Invalidation failures are logged
//! and swallowed so a cache outage cannot fail a committed write.

use tracing::warn;
use uuid::Uuid;

use petrodesk_cache::keys;
use petrodesk_cache::provider::CacheManager;
use petrodesk_core::traits::cache::CacheProvider;

/// Drop the entity and list keys for one employee.
pub(crate) async fn invalidate_employee(cache: &CacheManager, employee_id: Uuid) {
    for key in [keys::employee_by_id(employee_id), keys::employee_list()] {
        if let Err(e) = cache.delete(&key).await {
            warn!(key, error = %e, "Cache invalidation failed");
        }
    }
}

/// Drop the entity and list keys for one project.
pub(crate) async fn invalidate_project(cache: &CacheManager, project_id: Uuid) {
    for key in [keys::project_by_id(project_id), keys::project_list()] {
        if let Err(e) = cache.delete(&key).await {
            warn!(key, error = %e, "Cache invalidation failed");
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use petrodesk_core::result::AppResult;

    /// Cache provider that records every call for assertions.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingCache {
        pub(crate) stored: Mutex<HashMap<String, String>>,
        pub(crate) deleted: Mutex<Vec<String>>,
        pub(crate) fail_deletes: bool,
    }

    #[async_trait]
    impl CacheProvider for RecordingCache {
        async fn get(&self, key: &str) -> AppResult<Option<String>> {
            Ok(self.stored.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str, _ttl: Duration) -> AppResult<()> {
            self.stored
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn set_default(&self, _key: &str, _value: &str) -> AppResult<()> {
            Ok(())
        }

        async fn delete(&self, key: &str) -> AppResult<()> {
            self.deleted.lock().unwrap().push(key.to_string());
            if self.fail_deletes {
                Err(petrodesk_core::error::AppError::cache("boom"))
            } else {
                Ok(())
            }
        }

        async fn exists(&self, _key: &str) -> AppResult<bool> {
            Ok(false)
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(true)
        }

        async fn flush_all(&self) -> AppResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_employee_invalidation_drops_both_keys() {
        let provider = Arc::new(RecordingCache::default());
        let cache = CacheManager::from_provider(provider.clone());
        let id = Uuid::new_v4();

        invalidate_employee(&cache, id).await;

        let deleted = provider.deleted.lock().unwrap();
        assert_eq!(deleted.len(), 2);
        assert!(deleted.contains(&keys::employee_by_id(id)));
        assert!(deleted.contains(&keys::employee_list()));
    }

    #[tokio::test]
    async fn test_invalidation_failure_is_swallowed() {
        let provider = Arc::new(RecordingCache {
            fail_deletes: true,
            ..Default::default()
        });
        let cache = CacheManager::from_provider(provider.clone());

        // Both keys are still attempted even when the first delete fails.
        invalidate_employee(&cache, Uuid::new_v4()).await;
        assert_eq!(provider.deleted.lock().unwrap().len(), 2);
    }

    // The read paths in the services call `get_json`/`set_json` on an
    // `Arc<CacheManager>`; this covers that dispatch end to end.
    #[tokio::test]
    async fn test_json_round_trip_through_manager() {
        let provider = Arc::new(RecordingCache::default());
        let cache = Arc::new(CacheManager::from_provider(provider));
        let key = keys::employee_list();

        let names = vec!["Amina".to_string(), "Bjarte".to_string()];
        cache
            .set_json(&key, &names, Duration::from_secs(60))
            .await
            .unwrap();

        let cached: Option<Vec<String>> = cache.get_json(&key).await.unwrap();
        assert_eq!(cached, Some(names));
        assert_eq!(cache.get_json::<Vec<String>>("missing").await.unwrap(), None);
    }
}
