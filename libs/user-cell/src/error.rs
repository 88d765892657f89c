use thiserror::Error;

use shared_database::DatabaseError;
use shared_models::error::AppError;
use shared_utils::hash::HashError;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("E-mail address already used.")]
    EmailAlreadyRegistered,

    #[error("E-mail already in use")]
    EmailInUse,

    #[error("You need to inform the old password to set a new one")]
    OldPasswordRequired,

    #[error("Old password does not match")]
    OldPasswordMismatch,

    #[error("Only authenticated users can change avatar")]
    AvatarUnauthenticated,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound => AppError::NotFound(err.to_string()),
            UserError::AvatarUnauthenticated => AppError::Auth(err.to_string()),
            UserError::EmailAlreadyRegistered
            | UserError::EmailInUse
            | UserError::OldPasswordRequired
            | UserError::OldPasswordMismatch
            | UserError::Validation(_) => AppError::BadRequest(err.to_string()),
            UserError::Database(e) => e.into(),
            UserError::Hash(e) => e.into(),
            UserError::Storage(e) => AppError::Internal(e.to_string()),
        }
    }
}
