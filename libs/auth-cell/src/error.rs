use thiserror::Error;

use notification_cell::MailError;
use shared_database::DatabaseError;
use shared_models::error::AppError;
use shared_utils::hash::HashError;
use shared_utils::jwt::JwtError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Incorrect e-mail/password combination.")]
    IncorrectCredentials,

    #[error("User does not exist")]
    UserNotFound,

    #[error("User token does not exist")]
    TokenNotFound,

    #[error("Token expired")]
    TokenExpired,

    #[error("{0}")]
    Validation(String),

    #[error("Token signing failed: {0}")]
    Jwt(#[from] JwtError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error(transparent)]
    Mail(#[from] MailError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::IncorrectCredentials => AppError::Auth(err.to_string()),
            AuthError::UserNotFound | AuthError::TokenNotFound => AppError::NotFound(err.to_string()),
            AuthError::TokenExpired | AuthError::Validation(_) => AppError::BadRequest(err.to_string()),
            AuthError::Jwt(e) => AppError::Internal(e.to_string()),
            AuthError::Database(e) => e.into(),
            AuthError::Hash(e) => e.into(),
            AuthError::Mail(e) => e.into(),
        }
    }
}
