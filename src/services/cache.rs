use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::models::{CarUpdate, SearchParams};

const SEARCH_PREFIX: &str = "search:";

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),

    #[error("Invalidation error: {0}")]
    InvalidationError(String),
}

/// Time-boxed response cache
///
/// One in-process tier keyed by serialized query, lazily expired by TTL.
/// There is no cross-request coordination: two identical concurrent requests
/// both compute and the later write wins.
pub struct ResponseCache {
    entries: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl ResponseCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .support_invalidation_closures()
            .build();

        Self { entries, ttl_secs }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Get a cached value
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: DeserializeOwned,
    {
        if let Some(bytes) = self.entries.get(key).await {
            tracing::trace!("Cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value under the configured TTL
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.entries.insert(key.to_string(), bytes).await;
        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    pub async fn delete(&self, key: &str) {
        self.entries.invalidate(key).await;
    }

    /// Drop every cached search page
    pub fn invalidate_searches(&self) -> Result<(), CacheError> {
        self.entries
            .invalidate_entries_if(|key, _| key.starts_with(SEARCH_PREFIX))
            .map_err(|e| CacheError::InvalidationError(e.to_string()))?;

        tracing::debug!("Invalidated cached search pages");
        Ok(())
    }

    /// Apply the invalidation rule for one catalog event.
    ///
    /// Added and updated cars drop their own entry plus every search page;
    /// price and availability changes ride out the TTL.
    pub async fn handle_update(&self, update: &CarUpdate) -> Result<(), CacheError> {
        if !update.invalidates_cache() {
            return Ok(());
        }

        self.delete(&CacheKey::car(update.car_id())).await;
        self.invalidate_searches()
    }

    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for one search page, derived from the serialized parameters
    pub fn search(params: &SearchParams) -> String {
        serde_json::to_string(params)
            .map(|json| format!("{}{}", SEARCH_PREFIX, json))
            .unwrap_or_else(|_| format!("{}unserializable", SEARCH_PREFIX))
    }

    pub fn car(id: &str) -> String {
        format!("car:{}", id)
    }

    pub fn offers(limit: usize) -> String {
        format!("offers:{}", limit)
    }

    /// Batch key; ids are sorted so the same set hits the same entry
    pub fn batch(ids: &[String]) -> String {
        let mut sorted = ids.to_vec();
        sorted.sort();
        format!("batch:{}", sorted.join(","))
    }
}
