use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{CacheError, CacheProvider};

/// Process-local cache used in tests and when no Redis URL is configured.
#[derive(Default)]
pub struct InMemoryCacheProvider {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryCacheProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl CacheProvider for InMemoryCacheProvider {
    async fn save(&self, key: &str, value: String) -> Result<(), CacheError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn recover(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn invalidate_prefix(&self, prefix: &str) -> Result<(), CacheError> {
        let pattern = format!("{}:", prefix);
        self.entries.write().await.retain(|key, _| !key.starts_with(&pattern));
        Ok(())
    }
}
