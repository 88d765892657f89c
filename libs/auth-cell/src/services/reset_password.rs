use std::sync::Arc;

use chrono::Duration;
use tracing::{info, instrument};

use shared_utils::clock::Clock;
use shared_utils::hash::HashProvider;
use user_cell::UsersRepository;

use crate::error::AuthError;
use crate::models::ResetPasswordRequest;
use crate::repository::UserTokensRepository;

/// Reset tokens are accepted for two hours after they are issued.
pub const TOKEN_LIFETIME_HOURS: i64 = 2;

pub struct ResetPasswordService {
    users: Arc<dyn UsersRepository>,
    user_tokens: Arc<dyn UserTokensRepository>,
    hash: Arc<dyn HashProvider>,
    clock: Arc<dyn Clock>,
}

impl ResetPasswordService {
    pub fn new(
        users: Arc<dyn UsersRepository>,
        user_tokens: Arc<dyn UserTokensRepository>,
        hash: Arc<dyn HashProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { users, user_tokens, hash, clock }
    }

    #[instrument(skip(self, request), fields(token = %request.token))]
    pub async fn execute(&self, request: ResetPasswordRequest) -> Result<(), AuthError> {
        let user_token = self.user_tokens
            .find_by_token(request.token)
            .await?
            .ok_or(AuthError::TokenNotFound)?;

        let mut user = self.users
            .find_by_id(user_token.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if self.clock.now() > user_token.created_at + Duration::hours(TOKEN_LIFETIME_HOURS) {
            return Err(AuthError::TokenExpired);
        }

        user.password = self.hash.generate_hash(&request.password)?;
        self.users.save(user).await?;

        info!("Password reset for user {}", user_token.user_id);
        Ok(())
    }
}
