//! Caching layer for aggregation results and completion listings.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`NullCache`] - No-op implementation when Redis is not configured

mod null_cache;
mod redis_cache;
mod service;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{
    CacheError, CacheResult, CacheService, KEY_PREFIX, aggregate_key, get_json, set_json,
};
