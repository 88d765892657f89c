// libs/appointment-cell/src/handlers.rs
use axum::{
    extract::{rejection::QueryRejection, Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use uuid::Uuid;

use shared_models::auth::AuthenticatedUser;
use shared_models::error::AppError;
use shared_utils::extractor::AppJson;
use user_cell::UserProfile;

use crate::error::AppointmentError;
use crate::models::{
    Appointment, CreateAppointment, CreateAppointmentRequest, DayAvailability, DayQuery,
    HourAvailability, MonthQuery, ProviderAppointment,
};
use crate::router::AppointmentState;
use crate::services::{
    CreateAppointmentService, ListProviderAppointmentsService, ListProviderDayAvailabilityService,
    ListProviderMonthAvailabilityService, ListProvidersService,
};

fn date_query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppointmentError> {
    query.map(|Query(q)| q).map_err(|e| {
        debug!("Rejected date query: {}", e);
        AppointmentError::InvalidDate
    })
}

// ==============================================================================
// APPOINTMENT HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<AppointmentState>,
    Extension(user): Extension<AuthenticatedUser>,
    AppJson(request): AppJson<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let service = CreateAppointmentService::new(
        state.appointments.clone(),
        state.notifications.clone(),
        state.cache.clone(),
        state.clock.clone(),
        state.calendar,
    );

    let appointment = service.execute(CreateAppointment {
        provider_id: request.provider_id,
        user_id: user.id,
        date: request.date,
    }).await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// The caller's own schedule for one day.
pub async fn list_provider_appointments(
    State(state): State<AppointmentState>,
    Extension(user): Extension<AuthenticatedUser>,
    query: Result<Query<DayQuery>, QueryRejection>,
) -> Result<Json<Vec<ProviderAppointment>>, AppError> {
    let DayQuery { day, month, year } = date_query(query)?;

    let service = ListProviderAppointmentsService::new(
        state.appointments.clone(),
        state.users.clone(),
        state.cache.clone(),
        state.calendar,
        state.config.files_url(),
    );

    Ok(Json(service.execute(user.id, year, month, day).await?))
}

// ==============================================================================
// PROVIDER HANDLERS
// ==============================================================================

pub async fn list_providers(
    State(state): State<AppointmentState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<UserProfile>>, AppError> {
    let service = ListProvidersService::new(
        state.users.clone(),
        state.cache.clone(),
        state.config.files_url(),
    );

    Ok(Json(service.execute(user.id).await?))
}

pub async fn provider_day_availability(
    State(state): State<AppointmentState>,
    Path(provider_id): Path<Uuid>,
    query: Result<Query<DayQuery>, QueryRejection>,
) -> Result<Json<Vec<HourAvailability>>, AppError> {
    let DayQuery { day, month, year } = date_query(query)?;

    let service = ListProviderDayAvailabilityService::new(
        state.appointments.clone(),
        state.clock.clone(),
        state.calendar,
    );

    Ok(Json(service.execute(provider_id, year, month, day).await?))
}

pub async fn provider_month_availability(
    State(state): State<AppointmentState>,
    Path(provider_id): Path<Uuid>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Vec<DayAvailability>>, AppError> {
    let MonthQuery { month, year } = date_query(query)?;

    let service = ListProviderMonthAvailabilityService::new(state.appointments.clone(), state.calendar);

    Ok(Json(service.execute(provider_id, year, month).await?))
}
