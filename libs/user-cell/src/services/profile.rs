use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use shared_cache::{invalidate_prefix_logged, keys, CacheProvider};
use shared_utils::hash::HashProvider;

use crate::error::UserError;
use crate::models::{UpdateProfileRequest, User};
use crate::repository::UsersRepository;

pub struct ShowProfileService {
    users: Arc<dyn UsersRepository>,
}

impl ShowProfileService {
    pub fn new(users: Arc<dyn UsersRepository>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, user_id: Uuid) -> Result<User, UserError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)
    }
}

pub struct UpdateProfileService {
    users: Arc<dyn UsersRepository>,
    hash: Arc<dyn HashProvider>,
    cache: Arc<dyn CacheProvider>,
}

impl UpdateProfileService {
    pub fn new(
        users: Arc<dyn UsersRepository>,
        hash: Arc<dyn HashProvider>,
        cache: Arc<dyn CacheProvider>,
    ) -> Self {
        Self { users, hash, cache }
    }

    #[instrument(skip(self, request))]
    pub async fn execute(&self, user_id: Uuid, request: UpdateProfileRequest) -> Result<User, UserError> {
        let mut user = self.users
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)?;

        if let Some(owner) = self.users.find_by_email(&request.email).await? {
            if owner.id != user.id {
                return Err(UserError::EmailInUse);
            }
        }

        user.name = request.name;
        user.email = request.email;

        if let Some(password) = request.password {
            let old_password = request.old_password.ok_or(UserError::OldPasswordRequired)?;

            if !self.hash.compare_hash(&old_password, &user.password)? {
                return Err(UserError::OldPasswordMismatch);
            }

            user.password = self.hash.generate_hash(&password)?;
        }

        // Appointment listings embed the user's name and avatar.
        invalidate_prefix_logged(self.cache.as_ref(), keys::PROVIDER_APPOINTMENTS).await;

        let user = self.users.save(user).await?;
        info!("Profile {} updated", user.id);
        Ok(user)
    }
}
