//! Redis connection used for rate limiting and readiness checks.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::config::{Config, CACHE_HEALTH_KEY, CACHE_PREFIX_RATE_LIMIT};
use crate::errors::{AppError, AppResult};

/// Fixed-window request counter.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Count one request for `identifier` in the current window.
    ///
    /// Returns the request count so far and whether it is within `max_requests`.
    async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)>;
}

/// Redis client with a multiplexed, auto-reconnecting connection.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    /// Connect to Redis.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let cache = Self::try_connect(config).await.map_err(cache_error)?;
        tracing::info!("Redis connected");
        Ok(cache)
    }

    /// Connect to Redis, surfacing the raw driver error.
    pub async fn try_connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }

    /// Round-trip a cheap command to check connectivity.
    pub async fn ping(&self) -> Result<(), RedisError> {
        let mut conn = self.connection.clone();
        let _: bool = conn.exists(CACHE_HEALTH_KEY).await?;
        Ok(())
    }
}

#[async_trait]
impl RateLimiter for Cache {
    async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.connection.clone();

        let count: i64 = conn.incr(&key, 1).await.map_err(cache_error)?;

        // First hit opens the window
        if count == 1 {
            let _: () = conn
                .expire(&key, window_seconds as i64)
                .await
                .map_err(cache_error)?;
        }

        let count = count.max(0) as u64;
        Ok((count, count <= max_requests))
    }
}

fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::internal(format!("Cache error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_prefix() {
        assert_eq!(CACHE_PREFIX_RATE_LIMIT, "rate_limit:");
    }

    #[tokio::test]
    async fn test_invalid_url_fails_to_connect() {
        let mut config = Config::new("test-secret-key-for-testing-only-32chars").unwrap();
        config.redis_url = "not-a-redis-url".to_string();
        assert!(Cache::try_connect(&config).await.is_err());
    }
}
