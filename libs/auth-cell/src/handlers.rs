use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use tracing::debug;

use shared_models::error::AppError;
use shared_utils::extractor::AppJson;

use crate::models::{ForgotPasswordRequest, ResetPasswordRequest, SessionRequest, SessionResponse};
use crate::router::AuthState;
use crate::services::{AuthenticateUserService, ResetPasswordService, SendForgotPasswordEmailService};

pub async fn create_session(
    State(state): State<AuthState>,
    AppJson(request): AppJson<SessionRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    debug!("Creating session");
    request.validate()?;

    let service = AuthenticateUserService::new(
        state.users.clone(),
        state.hash.clone(),
        state.clock.clone(),
        state.config.clone(),
    );
    let (user, token) = service.execute(request).await?;

    Ok(Json(SessionResponse {
        user: user.to_profile(&state.config.files_url()),
        token,
    }))
}

pub async fn forgot_password(
    State(state): State<AuthState>,
    AppJson(request): AppJson<ForgotPasswordRequest>,
) -> Result<StatusCode, AppError> {
    request.validate()?;

    SendForgotPasswordEmailService::new(
        state.users.clone(),
        state.user_tokens.clone(),
        state.mail.clone(),
        state.config.app_web_url.clone(),
    )
    .execute(&request.email)
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn reset_password(
    State(state): State<AuthState>,
    AppJson(request): AppJson<ResetPasswordRequest>,
) -> Result<StatusCode, AppError> {
    request.validate()?;

    ResetPasswordService::new(
        state.users.clone(),
        state.user_tokens.clone(),
        state.hash.clone(),
        state.clock.clone(),
    )
    .execute(request)
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
