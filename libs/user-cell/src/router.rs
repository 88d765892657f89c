// libs/user-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post},
    middleware,
};

use shared_cache::CacheProvider;
use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;
use shared_utils::hash::HashProvider;

use crate::handlers;
use crate::repository::UsersRepository;
use crate::storage::StorageProvider;

#[derive(Clone)]
pub struct UserState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UsersRepository>,
    pub hash: Arc<dyn HashProvider>,
    pub storage: Arc<dyn StorageProvider>,
    pub cache: Arc<dyn CacheProvider>,
}

/// Mounted at `/users`.
pub fn user_routes(state: UserState) -> Router {
    let protected_routes = Router::new()
        .route("/avatar", patch(handlers::update_avatar))
        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware));

    Router::new()
        .route("/", post(handlers::create_user))
        .merge(protected_routes)
        .with_state(state)
}

/// Mounted at `/profile`.
pub fn profile_routes(state: UserState) -> Router {
    Router::new()
        .route("/", get(handlers::show_profile).put(handlers::update_profile))
        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware))
        .with_state(state)
}
