use std::sync::Arc;

use axum::{routing::post, Router};

use notification_cell::MailProvider;
use shared_config::AppConfig;
use shared_utils::clock::Clock;
use shared_utils::hash::HashProvider;
use user_cell::UsersRepository;

use crate::handlers;
use crate::repository::UserTokensRepository;

#[derive(Clone)]
pub struct AuthState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UsersRepository>,
    pub user_tokens: Arc<dyn UserTokensRepository>,
    pub hash: Arc<dyn HashProvider>,
    pub mail: Arc<dyn MailProvider>,
    pub clock: Arc<dyn Clock>,
}

/// Mounted at `/sessions`.
pub fn session_routes(state: AuthState) -> Router {
    Router::new()
        .route("/", post(handlers::create_session))
        .with_state(state)
}

/// Mounted at `/password`.
pub fn password_routes(state: AuthState) -> Router {
    Router::new()
        .route("/forgot", post(handlers::forgot_password))
        .route("/reset", post(handlers::reset_password))
        .with_state(state)
}
