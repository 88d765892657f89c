use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use shared_models::auth::{AuthenticatedUser, JwtClaims};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum JwtError {
    #[error("JWT secret is not set")]
    MissingSecret,

    #[error("Invalid token format")]
    Malformed,

    #[error("Invalid token signature")]
    BadSignature,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token expired")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => JwtError::BadSignature,
            ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Utf8(_) => JwtError::Malformed,
            _ => JwtError::InvalidClaims,
        }
    }
}

/// Issues an HS256 token whose subject is `subject`.
pub fn create_token(
    subject: &str,
    jwt_secret: &str,
    expires_in_hours: i64,
    issued_at: DateTime<Utc>,
) -> Result<String, JwtError> {
    if jwt_secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }

    let claims = JwtClaims {
        sub: subject.to_string(),
        iat: issued_at.timestamp().max(0) as u64,
        exp: (issued_at + Duration::hours(expires_in_hours)).timestamp().max(0) as u64,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )?;

    Ok(token)
}

/// Only HS256 tokens signed with `jwt_secret` are accepted.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<AuthenticatedUser, JwtError> {
    if jwt_secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        debug!("Token rejected: {}", e);
        JwtError::from(e)
    })?;

    let id = Uuid::parse_str(&data.claims.sub).map_err(|_| JwtError::InvalidClaims)?;

    debug!("Token validated successfully for user: {}", id);
    Ok(AuthenticatedUser { id })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_round_trip_returns_subject() {
        let id = Uuid::new_v4();
        let token = create_token(&id.to_string(), SECRET, 24, Utc::now()).unwrap();

        assert_eq!(token.split('.').count(), 3);
        assert_eq!(validate_token(&token, SECRET).unwrap().id, id);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let id = Uuid::new_v4();
        let token = create_token(&id.to_string(), SECRET, -1, Utc::now()).unwrap();

        assert_eq!(validate_token(&token, SECRET), Err(JwtError::Expired));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_token(&Uuid::new_v4().to_string(), "other-secret", 1, Utc::now()).unwrap();

        assert_eq!(validate_token(&token, SECRET), Err(JwtError::BadSignature));
    }

    #[test]
    fn test_non_uuid_subject_is_rejected() {
        let token = create_token("not-a-uuid", SECRET, 1, Utc::now()).unwrap();

        assert_eq!(validate_token(&token, SECRET), Err(JwtError::InvalidClaims));
    }

    #[test]
    fn test_other_algorithm_is_rejected() {
        let claims = JwtClaims {
            sub: Uuid::new_v4().to_string(),
            iat: Utc::now().timestamp() as u64,
            exp: (Utc::now() + Duration::hours(1)).timestamp() as u64,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(validate_token(&token, SECRET), Err(JwtError::BadSignature));
    }

    #[test]
    fn test_malformed_and_missing_secret() {
        assert_eq!(validate_token("invalid.token", SECRET), Err(JwtError::Malformed));
        assert_eq!(validate_token("a.b.c", ""), Err(JwtError::MissingSecret));
        assert_eq!(create_token("sub", "", 1, Utc::now()), Err(JwtError::MissingSecret));
    }
}
