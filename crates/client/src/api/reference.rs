//! Cached reference-data lookups.
//!
//! Types, statuses, and priorities change rarely; lookups are served from
//! the session cache and refetched after the TTL or an explicit
//! invalidation. Entity reads never go through here.

use opbridge_domain::Result;
use serde_json::Value;

use super::OpenProjectClient;

/// Cache key for the work package type collection.
pub const TYPES_CACHE_KEY: &str = "work_package_types";
/// Cache key for the work package status collection.
pub const STATUSES_CACHE_KEY: &str = "work_package_statuses";
/// Cache key for the priority collection.
pub const PRIORITIES_CACHE_KEY: &str = "priorities";

impl OpenProjectClient {
    /// Available work package types.
    pub async fn list_types(&self) -> Result<Vec<Value>> {
        self.cached_collection(TYPES_CACHE_KEY, "/types").await
    }

    /// Available work package statuses.
    pub async fn list_statuses(&self) -> Result<Vec<Value>> {
        self.cached_collection(STATUSES_CACHE_KEY, "/statuses").await
    }

    /// Available priorities.
    pub async fn list_priorities(&self) -> Result<Vec<Value>> {
        self.cached_collection(PRIORITIES_CACHE_KEY, "/priorities").await
    }

    async fn cached_collection(&self, key: &str, path: &str) -> Result<Vec<Value>> {
        self.cache.get_or_fetch(key, || self.fetch_elements(path, None)).await
    }
}
