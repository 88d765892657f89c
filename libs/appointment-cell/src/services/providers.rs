use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use shared_cache::{keys, recover_json, save_json, CacheProvider};
use user_cell::{UserProfile, UsersRepository};

use crate::error::AppointmentError;

/// Every user except the caller, as bookable providers.
pub struct ListProvidersService {
    users: Arc<dyn UsersRepository>,
    cache: Arc<dyn CacheProvider>,
    files_url: String,
}

impl ListProvidersService {
    pub fn new(
        users: Arc<dyn UsersRepository>,
        cache: Arc<dyn CacheProvider>,
        files_url: impl Into<String>,
    ) -> Self {
        Self { users, cache, files_url: files_url.into() }
    }

    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<UserProfile>, AppointmentError> {
        let cache_key = keys::providers_list(user_id);

        match recover_json::<Vec<UserProfile>>(self.cache.as_ref(), &cache_key).await {
            Ok(Some(cached)) => {
                debug!("Cache hit for {}", cache_key);
                return Ok(cached);
            }
            Ok(None) => {}
            Err(e) => warn!("Ignoring unreadable cache entry {}: {}", cache_key, e),
        }

        let providers: Vec<UserProfile> = self.users
            .find_all_providers(Some(user_id))
            .await?
            .iter()
            .map(|user| user.to_profile(&self.files_url))
            .collect();

        if let Err(e) = save_json(self.cache.as_ref(), &cache_key, &providers).await {
            warn!("Failed to cache {}: {}", cache_key, e);
        }

        Ok(providers)
    }
}
