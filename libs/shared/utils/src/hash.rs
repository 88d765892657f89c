use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use thiserror::Error;
use tracing::instrument;

use shared_models::error::AppError;

#[derive(Error, Debug)]
#[error("Password hashing failed: {0}")]
pub struct HashError(String);

impl From<argon2::password_hash::Error> for HashError {
    fn from(err: argon2::password_hash::Error) -> Self {
        HashError(err.to_string())
    }
}

impl From<HashError> for AppError {
    fn from(err: HashError) -> Self {
        AppError::Internal(err.to_string())
    }
}

pub trait HashProvider: Send + Sync {
    fn generate_hash(&self, payload: &str) -> Result<String, HashError>;

    fn compare_hash(&self, payload: &str, hashed: &str) -> Result<bool, HashError>;
}

pub struct Argon2HashProvider;

impl HashProvider for Argon2HashProvider {
    #[instrument(skip_all)]
    fn generate_hash(&self, payload: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let password_hash = argon2.hash_password(payload.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    #[instrument(skip_all)]
    fn compare_hash(&self, payload: &str, hashed: &str) -> Result<bool, HashError> {
        let parsed_hash = PasswordHash::new(hashed)?;
        let argon2 = Argon2::default();

        match argon2.verify_password(payload.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Stores payloads verbatim; for tests only.
pub struct FakeHashProvider;

impl HashProvider for FakeHashProvider {
    fn generate_hash(&self, payload: &str) -> Result<String, HashError> {
        Ok(payload.to_string())
    }

    fn compare_hash(&self, payload: &str, hashed: &str) -> Result<bool, HashError> {
        Ok(payload == hashed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argon2_hash_and_compare() {
        let provider = Argon2HashProvider;
        let hash = provider.generate_hash("123456").unwrap();

        assert_ne!(hash, "123456");
        assert!(provider.compare_hash("123456", &hash).unwrap());
        assert!(!provider.compare_hash("654321", &hash).unwrap());
    }

    #[test]
    fn test_argon2_rejects_garbage_hash() {
        assert!(Argon2HashProvider.compare_hash("123456", "not-a-phc-string").is_err());
    }
}
