//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService, KEY_PREFIX};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

const SCAN_BATCH: usize = 500;

/// Redis cache for aggregation results and completion listings.
///
/// Uses `ConnectionManager` for connection reuse. All operations are
/// fail-open: errors are logged but don't propagate to callers.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
        })
    }

    fn build_key(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }

    async fn scan_prefixed(&self) -> CacheResult<Vec<String>> {
        let mut conn = self.client.clone();
        let pattern = format!("{KEY_PREFIX}*");
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();

        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(|e| CacheError::OperationError(format!("SCAN failed: {}", e)))?;

            keys.extend(batch);
            if next == 0 {
                return Ok(keys);
            }
            cursor = next;
        }
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(Self::build_key(key)).await {
            Ok(Some(value)) => {
                debug!(key, "Cache HIT");
                Ok(Some(value))
            }
            Ok(None) => {
                debug!(key, "Cache MISS");
                Ok(None)
            }
            Err(e) => {
                error!(key, error = %e, "Redis GET error");
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> CacheResult<()> {
        let mut conn = self.client.clone();
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        match conn
            .set_ex::<_, _, ()>(Self::build_key(key), value, ttl)
            .await
        {
            Ok(_) => debug!(key, ttl, "Cache SET"),
            Err(e) => warn!(key, error = %e, "Redis SET error"),
        }

        Ok(())
    }

    async fn invalidate_all(&self) -> CacheResult<u64> {
        let keys = match self.scan_prefixed().await {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "Cache invalidation skipped");
                return Ok(0);
            }
        };

        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.client.clone();
        let mut removed = 0;
        for chunk in keys.chunks(SCAN_BATCH) {
            match conn.del::<_, u64>(chunk.to_vec()).await {
                Ok(n) => removed += n,
                Err(e) => warn!(error = %e, "Redis DEL error"),
            }
        }

        info!(removed, "Cache invalidated");
        Ok(removed)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
