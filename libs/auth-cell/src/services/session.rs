use std::sync::Arc;

use tracing::{info, instrument};

use shared_config::AppConfig;
use shared_utils::clock::Clock;
use shared_utils::hash::HashProvider;
use shared_utils::jwt::create_token;
use user_cell::{User, UsersRepository};

use crate::error::AuthError;
use crate::models::SessionRequest;

pub struct AuthenticateUserService {
    users: Arc<dyn UsersRepository>,
    hash: Arc<dyn HashProvider>,
    clock: Arc<dyn Clock>,
    config: Arc<AppConfig>,
}

impl AuthenticateUserService {
    pub fn new(
        users: Arc<dyn UsersRepository>,
        hash: Arc<dyn HashProvider>,
        clock: Arc<dyn Clock>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self { users, hash, clock, config }
    }

    /// Returns the user together with a signed bearer token.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn execute(&self, request: SessionRequest) -> Result<(User, String), AuthError> {
        let user = self.users
            .find_by_email(&request.email)
            .await?
            .ok_or(AuthError::IncorrectCredentials)?;

        if !self.hash.compare_hash(&request.password, &user.password)? {
            return Err(AuthError::IncorrectCredentials);
        }

        let token = create_token(
            &user.id.to_string(),
            &self.config.jwt_secret,
            self.config.jwt_expires_in_hours,
            self.clock.now(),
        )?;

        info!("User {} authenticated", user.id);
        Ok((user, token))
    }
}
