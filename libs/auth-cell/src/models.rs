use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use user_cell::models::{validate_email, validate_password};
use user_cell::UserProfile;

use crate::error::AuthError;

/// Single-use password reset token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserToken {
    pub id: Uuid,
    pub token: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionRequest {
    pub email: String,
    pub password: String,
}

impl SessionRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        validate_email(&self.email).map_err(|e| AuthError::Validation(e.to_string()))?;

        if self.password.is_empty() {
            return Err(AuthError::Validation("Password is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: UserProfile,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl ForgotPasswordRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        validate_email(&self.email).map_err(|e| AuthError::Validation(e.to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: Uuid,
    pub password: String,
    pub password_confirmation: String,
}

impl ResetPasswordRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        validate_password(&self.password).map_err(|e| AuthError::Validation(e.to_string()))?;

        if self.password != self.password_confirmation {
            return Err(AuthError::Validation("Password confirmation does not match".to_string()));
        }
        Ok(())
    }
}
