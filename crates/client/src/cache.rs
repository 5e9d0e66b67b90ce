//! Reference-data caching with moka
//!
//! Time-boxed memoization in front of the request executor for
//! slowly-changing lookup collections (work package types, statuses,
//! priorities, time-entry activities). Entity reads are never cached;
//! they must always reflect current remote state.
//!
//! Fetch failures propagate uncached: a failed refresh leaves any prior
//! entry untouched and never poisons the cache. Concurrent misses may fetch
//! twice; each writer stores its own result and the last one wins.

use std::future::Future;
use std::time::Duration;

use moka::sync::Cache;
use opbridge_domain::constants::REFERENCE_CACHE_TTL_SECS;
use opbridge_domain::Result;
use serde_json::Value;
use tracing::debug;

const MAX_COLLECTIONS: u64 = 64;

/// In-memory TTL cache for reference collections.
///
/// The TTL is fixed per instance and uniform across keys; it is not wired
/// to any deployment configuration value.
pub struct ReferenceCache {
    entries: Cache<String, Vec<Value>>,
}

impl ReferenceCache {
    /// Cache with the standard five-minute TTL.
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(REFERENCE_CACHE_TTL_SECS))
    }

    /// Cache with a custom TTL (useful for testing expiry).
    pub fn with_ttl(ttl: Duration) -> Self {
        let entries = Cache::builder().time_to_live(ttl).max_capacity(MAX_COLLECTIONS).build();
        Self { entries }
    }

    /// Return the cached collection for `key`, or fetch, store, and return
    /// a fresh one.
    ///
    /// `fetch` runs only on a miss or after expiry; its errors propagate
    /// without touching the cache.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Result<Vec<Value>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Value>>>,
    {
        if let Some(hit) = self.entries.get(key) {
            debug!(key, "reference cache hit");
            return Ok(hit);
        }

        debug!(key, "reference cache miss, fetching");
        let fresh = fetch().await?;
        self.entries.insert(key.to_owned(), fresh.clone());
        Ok(fresh)
    }

    /// Drop a single cached collection.
    pub fn invalidate(&self, key: &str) {
        self.entries.invalidate(key);
        debug!(key, "reference cache entry invalidated");
    }

    /// Drop every cached collection.
    pub fn clear(&self) {
        self.entries.invalidate_all();
        debug!("reference cache cleared");
    }

    /// Number of live entries (pending evictions applied first).
    pub fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }
}

impl Default for ReferenceCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use opbridge_domain::{ApiError, Error};
    use serde_json::json;

    use super::*;

    fn statuses(n: usize) -> Vec<Value> {
        (1..=n).map(|id| json!({"id": id, "name": format!("Status {id}")})).collect()
    }

    #[tokio::test]
    async fn second_call_within_ttl_returns_cached_payload() {
        let cache = ReferenceCache::new();
        let fetches = Arc::new(AtomicUsize::new(0));

        let first = {
            let fetches = Arc::clone(&fetches);
            cache
                .get_or_fetch("statuses", || async move {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok(statuses(5))
                })
                .await
                .unwrap()
        };

        let second = {
            let fetches = Arc::clone(&fetches);
            cache
                .get_or_fetch("statuses", || async move {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok(statuses(5))
                })
                .await
                .unwrap()
        };

        assert_eq!(first, second);
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_entry_triggers_exactly_one_refetch() {
        let cache = ReferenceCache::with_ttl(Duration::from_millis(40));
        let fetches = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let fetches = Arc::clone(&fetches);
            cache
                .get_or_fetch("types", || async move {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok(statuses(3))
                })
                .await
                .unwrap();
        }
        assert_eq!(fetches.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(80)).await;

        let fetches_clone = Arc::clone(&fetches);
        cache
            .get_or_fetch("types", || async move {
                fetches_clone.fetch_add(1, Ordering::SeqCst);
                Ok(statuses(3))
            })
            .await
            .unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidation_forces_refetch_before_ttl() {
        let cache = ReferenceCache::new();
        let fetches = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let fetches = Arc::clone(&fetches);
            cache
                .get_or_fetch("priorities", || async move {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok(statuses(4))
                })
                .await
                .unwrap();
        }
        assert_eq!(fetches.load(Ordering::SeqCst), 1);

        cache.invalidate("priorities");

        let fetches_clone = Arc::clone(&fetches);
        cache
            .get_or_fetch("priorities", || async move {
                fetches_clone.fetch_add(1, Ordering::SeqCst);
                Ok(statuses(4))
            })
            .await
            .unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_fetch_is_never_cached() {
        let cache = ReferenceCache::new();

        cache.get_or_fetch("types", || async { Ok(statuses(2)) }).await.unwrap();
        cache.invalidate("types");

        let result = cache
            .get_or_fetch("types", || async {
                Err(Error::Api(ApiError::bare("Request failed: connection reset")))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(cache.entry_count(), 0);

        // A later successful fetch repopulates normally.
        let recovered = cache.get_or_fetch("types", || async { Ok(statuses(2)) }).await.unwrap();
        assert_eq!(recovered.len(), 2);
    }

    #[tokio::test]
    async fn clear_drops_every_key() {
        let cache = ReferenceCache::new();
        cache.get_or_fetch("types", || async { Ok(statuses(1)) }).await.unwrap();
        cache.get_or_fetch("statuses", || async { Ok(statuses(1)) }).await.unwrap();
        assert_eq!(cache.entry_count(), 2);

        cache.clear();
        assert_eq!(cache.entry_count(), 0);
    }
}
