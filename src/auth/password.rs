//! Password hashing and verification using Argon2id

use crate::error::AppError;
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Argon2,
};
use once_cell::sync::Lazy;

/// Hash of a throwaway password, verified against when a login names no stored credential
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| PasswordHasher::new().hash("taskgate-dummy-password").ok());

/// Password hasher using the algorithm's default cost parameters
#[derive(Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Argon2id, version 0x13, default memory/time/parallelism cost
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hash a password into a PHC string; the salt is embedded and fresh per call
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("Failed to hash password: {:?}", e);
                AppError::Internal(format!("Failed to hash password: {}", e))
            })?
            .to_string();

        Ok(password_hash)
    }

    /// Check a password against a stored hash.
    ///
    /// A malformed hash verifies as `false`, it is not an error.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!("Failed to parse password hash: {:?}", e);
                return false;
            }
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Spend the same work as [`verify`](Self::verify) on a real hash, then fail.
    /// Used when there is no credential to check against.
    pub fn verify_dummy(&self, password: &str) -> bool {
        if let Some(hash) = DUMMY_HASH.as_deref() {
            let _ = self.verify(password, hash);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "TestPassword123!";

        let hash = hasher.hash(password).unwrap();
        assert!(hasher.verify(password, &hash));
    }

    #[test]
    fn test_verify_fails_with_wrong_password() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("TestPassword123!").unwrap();
        assert!(!hasher.verify("WrongPassword", &hash));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify("password123", "not-a-phc-string"));
        assert!(!hasher.verify("password123", ""));
    }

    #[test]
    fn test_verify_dummy_runs_full_argon2_and_fails() {
        let hasher = PasswordHasher::new();

        let dummy = DUMMY_HASH.as_deref().unwrap();
        assert!(dummy.starts_with("$argon2id$"));
        assert!(PasswordHash::new(dummy).is_ok());

        assert!(!hasher.verify_dummy("taskgate-dummy-password"));
        assert!(!hasher.verify_dummy("password123"));
    }

    #[test]
    fn test_hash_does_not_contain_password() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("password123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("password123"));
    }
}
