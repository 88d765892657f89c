use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use shared_cache::{invalidate_prefix_logged, keys, CacheProvider};

use crate::error::UserError;
use crate::models::User;
use crate::repository::UsersRepository;
use crate::storage::{unique_file_name, StorageProvider};

pub struct UpdateUserAvatarService {
    users: Arc<dyn UsersRepository>,
    storage: Arc<dyn StorageProvider>,
    cache: Arc<dyn CacheProvider>,
}

impl UpdateUserAvatarService {
    pub fn new(
        users: Arc<dyn UsersRepository>,
        storage: Arc<dyn StorageProvider>,
        cache: Arc<dyn CacheProvider>,
    ) -> Self {
        Self { users, storage, cache }
    }

    #[instrument(skip(self, contents), fields(size = contents.len()))]
    pub async fn execute(&self, user_id: Uuid, file_name: &str, contents: Vec<u8>) -> Result<User, UserError> {
        let mut user = self.users
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::AvatarUnauthenticated)?;

        if let Some(previous) = user.avatar.take() {
            if let Err(e) = self.storage.delete_file(&previous).await {
                warn!("Could not delete previous avatar {}: {}", previous, e);
            }
        }

        let stored = self.storage.save_file(&unique_file_name(file_name), contents).await?;
        user.avatar = Some(stored);

        let user = self.users.save(user).await?;
        invalidate_prefix_logged(self.cache.as_ref(), keys::PROVIDER_APPOINTMENTS).await;

        info!("Avatar updated for user {}", user.id);
        Ok(user)
    }
}
