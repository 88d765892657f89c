// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use notification_cell::NotificationsRepository;
use shared_cache::CacheProvider;
use shared_config::AppConfig;
use shared_utils::clock::Clock;
use shared_utils::extractor::auth_middleware;
use user_cell::UsersRepository;

use crate::calendar::BusinessCalendar;
use crate::handlers;
use crate::repository::AppointmentsRepository;

#[derive(Clone)]
pub struct AppointmentState {
    pub config: Arc<AppConfig>,
    pub appointments: Arc<dyn AppointmentsRepository>,
    pub users: Arc<dyn UsersRepository>,
    pub notifications: Arc<dyn NotificationsRepository>,
    pub cache: Arc<dyn CacheProvider>,
    pub clock: Arc<dyn Clock>,
    pub calendar: BusinessCalendar,
}

/// Mounted at `/appointments`. Every route requires authentication.
pub fn appointment_routes(state: AppointmentState) -> Router {
    Router::new()
        .route("/", post(handlers::create_appointment))
        .route("/me", get(handlers::list_provider_appointments))
        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware))
        .with_state(state)
}

/// Mounted at `/providers`. Every route requires authentication.
pub fn provider_routes(state: AppointmentState) -> Router {
    Router::new()
        .route("/", get(handlers::list_providers))
        .route("/{provider_id}/day-availability", get(handlers::provider_day_availability))
        .route("/{provider_id}/month-availability", get(handlers::provider_month_availability))
        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware))
        .with_state(state)
}
