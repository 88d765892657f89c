// libs/user-cell/src/handlers.rs
use axum::{
    extract::{Extension, Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use shared_models::auth::AuthenticatedUser;
use shared_models::error::AppError;
use shared_utils::extractor::AppJson;

use crate::models::{CreateUserRequest, UpdateProfileRequest, UserProfile};
use crate::router::UserState;
use crate::services::{
    CreateUserService, ShowProfileService, UpdateProfileService, UpdateUserAvatarService,
};

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<UserState>,
    AppJson(request): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    request.validate()?;

    let service = CreateUserService::new(state.users.clone(), state.hash.clone(), state.cache.clone());
    let user = service.execute(request).await?;

    Ok((StatusCode::CREATED, Json(user.to_profile(&state.config.files_url()))))
}

pub async fn show_profile(
    State(state): State<UserState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<UserProfile>, AppError> {
    let user = ShowProfileService::new(state.users.clone())
        .execute(auth.id)
        .await?;

    Ok(Json(user.to_profile(&state.config.files_url())))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<UserState>,
    Extension(auth): Extension<AuthenticatedUser>,
    AppJson(request): AppJson<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, AppError> {
    request.validate()?;

    let service = UpdateProfileService::new(state.users.clone(), state.hash.clone(), state.cache.clone());
    let user = service.execute(auth.id, request).await?;

    Ok(Json(user.to_profile(&state.config.files_url())))
}

#[axum::debug_handler]
pub async fn update_avatar(
    State(state): State<UserState>,
    Extension(auth): Extension<AuthenticatedUser>,
    mut multipart: Multipart,
) -> Result<Json<UserProfile>, AppError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("avatar") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("avatar").to_string();
        let contents = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        debug!("Received avatar upload {} ({} bytes)", file_name, contents.len());
        upload = Some((file_name, contents.to_vec()));
        break;
    }

    let (file_name, contents) = upload
        .ok_or_else(|| AppError::BadRequest("Avatar file is required".to_string()))?;

    let service = UpdateUserAvatarService::new(state.users.clone(), state.storage.clone(), state.cache.clone());
    let user = service.execute(auth.id, &file_name, contents).await?;

    Ok(Json(user.to_profile(&state.config.files_url())))
}
