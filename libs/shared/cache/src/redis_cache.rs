use async_trait::async_trait;
use deadpool_redis::{Config, Connection, Pool, Runtime};
use redis::AsyncCommands;
use tracing::{debug, info};

use crate::{CacheError, CacheProvider};

pub struct RedisCacheProvider {
    pool: Pool,
}

impl RedisCacheProvider {
    pub async fn new(redis_url: &str) -> Result<Self, CacheError> {
        let cfg = Config::from_url(redis_url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| CacheError::Pool(format!("Pool creation error: {}", e)))?;

        // Test connection
        let mut conn = pool
            .get()
            .await
            .map_err(|e| CacheError::Pool(format!("Connection error: {}", e)))?;

        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        info!("Redis cache provider initialized successfully");

        Ok(Self { pool })
    }

    async fn get_connection(&self) -> Result<Connection, CacheError> {
        self.pool
            .get()
            .await
            .map_err(|e| CacheError::Pool(e.to_string()))
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn save(&self, key: &str, value: String) -> Result<(), CacheError> {
        let mut conn = self.get_connection().await?;
        let _: () = conn.set(key, value).await?;
        debug!("Cached {}", key);
        Ok(())
    }

    async fn recover(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.get_connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.get_connection().await?;
        let _: () = conn.del(key).await?;
        debug!("Invalidated {}", key);
        Ok(())
    }

    async fn invalidate_prefix(&self, prefix: &str) -> Result<(), CacheError> {
        let mut conn = self.get_connection().await?;

        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(format!("{}:*", prefix))
            .query_async(&mut conn)
            .await?;

        if !keys.is_empty() {
            let _: () = conn.del(&keys).await?;
        }

        debug!("Invalidated {} keys under {}", keys.len(), prefix);
        Ok(())
    }
}
