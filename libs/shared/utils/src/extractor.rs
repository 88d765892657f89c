use std::sync::Arc;

use axum::{
    extract::{FromRequest, State},
    http::Request,
    middleware::Next,
    response::Response,
    body::Body,
};
use headers::{authorization::Bearer, Authorization, HeaderMapExt};
use tracing::debug;

use shared_models::error::AppError;
use shared_config::AppConfig;

use crate::jwt::validate_token;

/// `Json` body extractor whose rejections render as [`AppError::BadRequest`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Resolves the bearer token into an
/// [`AuthenticatedUser`](shared_models::auth::AuthenticatedUser) request extension.
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = request
        .headers()
        .typed_try_get::<Authorization<Bearer>>()
        .map_err(|_| AppError::Auth("Invalid JWT token".to_string()))?
        .ok_or_else(|| AppError::Auth("JWT token is missing".to_string()))?;

    let user = validate_token(bearer.token(), &config.jwt_secret).map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        AppError::Auth("Invalid JWT token".to_string())
    })?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
