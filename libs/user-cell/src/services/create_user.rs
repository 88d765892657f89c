use std::sync::Arc;

use tracing::{info, instrument};

use shared_cache::{invalidate_prefix_logged, keys, CacheProvider};
use shared_utils::hash::HashProvider;

use crate::error::UserError;
use crate::models::{CreateUser, CreateUserRequest, User};
use crate::repository::UsersRepository;

pub struct CreateUserService {
    users: Arc<dyn UsersRepository>,
    hash: Arc<dyn HashProvider>,
    cache: Arc<dyn CacheProvider>,
}

impl CreateUserService {
    pub fn new(
        users: Arc<dyn UsersRepository>,
        hash: Arc<dyn HashProvider>,
        cache: Arc<dyn CacheProvider>,
    ) -> Self {
        Self { users, hash, cache }
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn execute(&self, request: CreateUserRequest) -> Result<User, UserError> {
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(UserError::EmailAlreadyRegistered);
        }

        let password = self.hash.generate_hash(&request.password)?;

        let user = self.users.create(CreateUser {
            name: request.name,
            email: request.email,
            password,
        }).await?;

        invalidate_prefix_logged(self.cache.as_ref(), keys::PROVIDERS_LIST).await;

        info!("User {} created", user.id);
        Ok(user)
    }
}
