//! Key/value cache used to memoize listings.
//!
//! The cache is never a source of truth: callers log failures and carry on.

pub mod error;
pub mod keys;
pub mod memory;
pub mod redis_cache;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

pub use error::CacheError;
pub use memory::InMemoryCacheProvider;
pub use redis_cache::RedisCacheProvider;

#[async_trait]
pub trait CacheProvider: Send + Sync {
    async fn save(&self, key: &str, value: String) -> Result<(), CacheError>;

    async fn recover(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn invalidate(&self, key: &str) -> Result<(), CacheError>;

    /// Removes every entry whose key starts with `{prefix}:`.
    async fn invalidate_prefix(&self, prefix: &str) -> Result<(), CacheError>;
}

pub async fn save_json<T>(cache: &dyn CacheProvider, key: &str, value: &T) -> Result<(), CacheError>
where
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_string(value)?;
    cache.save(key, payload).await
}

pub async fn recover_json<T>(cache: &dyn CacheProvider, key: &str) -> Result<Option<T>, CacheError>
where
    T: DeserializeOwned,
{
    match cache.recover(key).await? {
        Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
        None => Ok(None),
    }
}

/// Invalidates a prefix, logging instead of failing.
pub async fn invalidate_prefix_logged(cache: &dyn CacheProvider, prefix: &str) {
    if let Err(e) = cache.invalidate_prefix(prefix).await {
        tracing::warn!("Failed to invalidate cache prefix {}: {}", prefix, e);
    }
}
