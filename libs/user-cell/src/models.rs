use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::UserError;

// ==============================================================================
// ENTITY
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Client-facing view: no password, avatar resolved to a public URL.
    pub fn to_profile(&self, files_url: &str) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            avatar_url: self.avatar
                .as_ref()
                .map(|avatar| format!("{}/{}", files_url, avatar)),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), UserError> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
    pub old_password: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), UserError> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;

        if let Some(password) = &self.password {
            validate_password(password)?;

            if self.password_confirmation.as_deref() != Some(password.as_str()) {
                return Err(UserError::Validation(
                    "Password confirmation does not match".to_string(),
                ));
            }
        }

        Ok(())
    }
}

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

pub fn validate_name(name: &str) -> Result<(), UserError> {
    if name.trim().is_empty() {
        return Err(UserError::Validation("Name is required".to_string()));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), UserError> {
    if !email_regex().is_some_and(|re| re.is_match(email)) {
        return Err(UserError::Validation("E-mail must be a valid address".to_string()));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), UserError> {
    if password.chars().count() < 6 {
        return Err(UserError::Validation(
            "Password must be at least 6 characters long".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(avatar: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            name: "John Doe".to_string(),
            email: "johndoe@example.com".to_string(),
            password: "hashed".to_string(),
            avatar: avatar.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_password_is_never_serialized() {
        let json = serde_json::to_value(user(None)).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_profile_resolves_avatar_url() {
        let profile = user(Some("abc-avatar.png")).to_profile("http://localhost:3333/files");
        assert_eq!(profile.avatar_url.as_deref(), Some("http://localhost:3333/files/abc-avatar.png"));

        assert!(user(None).to_profile("http://x/files").avatar_url.is_none());
    }

    #[test]
    fn test_create_request_validation() {
        let valid = CreateUserRequest {
            name: "John".to_string(),
            email: "john@example.com".to_string(),
            password: "123456".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = CreateUserRequest { email: "john.example.com".to_string(), ..valid.clone() };
        assert!(bad_email.validate().is_err());

        let short_password = CreateUserRequest { password: "123".to_string(), ..valid };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_update_request_requires_matching_confirmation() {
        let request = UpdateProfileRequest {
            name: "John".to_string(),
            email: "john@example.com".to_string(),
            old_password: Some("123456".to_string()),
            password: Some("123123".to_string()),
            password_confirmation: Some("321321".to_string()),
        };
        assert!(request.validate().is_err());

        let matching = UpdateProfileRequest {
            password_confirmation: Some("123123".to_string()),
            ..request
        };
        assert!(matching.validate().is_ok());
    }
}
