//! Cache service trait, error types and JSON helpers.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Namespace of every key written by this service.
pub const KEY_PREFIX: &str = "price-m2:";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value cache for serialized responses.
///
/// Keys are passed without [`KEY_PREFIX`]; implementations add it.
/// Implementations are fail-open: backend errors are logged and reported as
/// misses or successful no-ops.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the stored payload, `None` on miss or backend error.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a payload; `ttl_seconds = None` uses the implementation default.
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> CacheResult<()>;

    /// Removes every key under [`KEY_PREFIX`] and returns how many were removed.
    async fn invalidate_all(&self) -> CacheResult<u64>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}

/// Cache key of an aggregation result.
pub fn aggregate_key(zip_code: &str, aggregate: &str, construction_type: i64) -> String {
    format!("aggregate:{zip_code}:{aggregate}:{construction_type}")
}

/// Reads and deserializes a cached value; undecodable entries count as misses.
pub async fn get_json<T: DeserializeOwned>(cache: &dyn CacheService, key: &str) -> Option<T> {
    let raw = cache.get(key).await.ok().flatten()?;

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding undecodable cache entry");
            None
        }
    }
}

/// Serializes and stores a value with the default TTL.
pub async fn set_json<T: Serialize + Sync>(cache: &dyn CacheService, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => {
            if let Err(e) = cache.set(key, &raw, None).await {
                tracing::warn!(key, error = %e, "Cache write failed");
            }
        }
        Err(e) => tracing::warn!(key, error = %e, "Could not serialize cache entry"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::NullCache;

    #[test]
    fn test_aggregate_key_layout() {
        assert_eq!(aggregate_key("10101", "avg", 1), "aggregate:10101:avg:1");
    }

    #[tokio::test]
    async fn test_null_cache_always_misses() {
        let cache = NullCache::new();
        set_json(&cache, "k", &vec![1, 2, 3]).await;

        let value: Option<Vec<i32>> = get_json(&cache, "k").await;

        assert!(value.is_none());
        assert_eq!(cache.invalidate_all().await.unwrap(), 0);
    }
}
