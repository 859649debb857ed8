//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{
    redis::{self, AsyncCommands},
    Pool,
};
use rota_core::{RotaError, RotaResult};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Longest expiry handed to `SET EX` (one year).
pub const MAX_EXPIRE_SECS: u64 = 365 * 24 * 60 * 60;

/// Redis-based cache service. Entries expire natively via `SET EX`.
///
/// Built without a pool, every operation fails with a cache error.
#[derive(Component)]
#[shaku(interface = CacheInterface)]
pub struct RedisCacheService {
    /// Redis connection pool.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheService {
    /// Component parameters for wiring this service into a DI module.
    #[must_use]
    pub fn parameters(pool: Arc<Pool>) -> RedisCacheServiceParameters {
        RedisCacheServiceParameters { pool: Some(pool) }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> RotaResult<deadpool_redis::Connection> {
        let pool = self
            .pool
            .as_ref()
            .ok_or_else(|| RotaError::Cache("Redis pool is not configured".to_string()))?;

        pool.get()
            .await
            .map_err(|e| RotaError::Cache(format!("Failed to get Redis connection: {}", e)))
    }
}

/// Expiry in whole seconds, between one second and [`MAX_EXPIRE_SECS`].
fn expire_secs(ttl: Duration) -> u64 {
    ttl.as_secs().clamp(1, MAX_EXPIRE_SECS)
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    async fn get_raw(&self, key: &str) -> RotaResult<Option<String>> {
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            RotaError::Cache(format!("Failed to get key '{}': {}", key, e))
        })?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> RotaResult<()> {
        let mut conn = self.get_conn().await?;
        let ttl_secs = expire_secs(ttl);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await.map_err(|e| {
            RotaError::Cache(format!("Failed to set key '{}': {}", key, e))
        })?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn ping(&self) -> RotaResult<()> {
        let mut conn = self.get_conn().await?;
        let _pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| RotaError::Cache(format!("Redis ping failed: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expire_secs_is_clamped() {
        assert_eq!(expire_secs(Duration::ZERO), 1);
        assert_eq!(expire_secs(Duration::from_millis(1500)), 1);
        assert_eq!(expire_secs(Duration::from_secs(600)), 600);
        assert_eq!(expire_secs(Duration::MAX), MAX_EXPIRE_SECS);
    }

    #[tokio::test]
    async fn test_missing_pool_is_a_cache_error() {
        let cache = RedisCacheService { pool: None };

        assert!(matches!(cache.get_raw("k").await, Err(RotaError::Cache(_))));
        assert!(matches!(
            cache.set_raw("k", "v", Duration::from_secs(600)).await,
            Err(RotaError::Cache(_))
        ));
        assert!(cache.ping().await.is_err());
    }
}
