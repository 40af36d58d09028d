//! Credential domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

/// Normalize an identity key (email) before it touches a store.
///
/// Lookups and uniqueness are case-insensitive: keys are trimmed and lowercased.
pub fn normalize_identity(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Stored user credential
#[derive(Clone, Serialize, sqlx::FromRow)]
pub struct Credential {
    pub id: Uuid,
    /// Identity key, unique and already normalized
    pub email: String,
    /// Display name
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// password_hash must never reach the logs
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Values needed to create a credential; the password is already hashed
#[derive(Clone)]
pub struct NewCredential {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(length(min = 8, max = 50, message = "password must be 8-50 characters"))]
    pub password: String,
}

/// Profile update request, both fields optional
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
}

/// Change password request
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    #[validate(length(min = 8, max = 50, message = "new_password must be 8-50 characters"))]
    pub new_password: String,
}

/// User response (without sensitive data)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<Credential> for UserResponse {
    fn from(credential: Credential) -> Self {
        Self {
            id: credential.id,
            email: credential.email,
            username: credential.username,
            created_at: credential.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Credential {
        Credential {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            username: "alice".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_normalize_identity() {
        assert_eq!(normalize_identity("  Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn test_debug_redacts_hash() {
        let rendered = format!("{:?}", sample());
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("argon2"));
    }

    #[test]
    fn test_serialize_skips_hash() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@x.com");
    }

    #[test]
    fn test_register_request_validation() {
        let ok = RegisterRequest {
            email: "a@x.com".to_string(),
            username: "alice".to_string(),
            password: "password123".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad_email = RegisterRequest { email: "not-an-email".to_string(), ..ok.clone() };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest { password: "short".to_string(), ..ok.clone() };
        assert!(short_password.validate().is_err());

        let short_username = RegisterRequest { username: "al".to_string(), ..ok.clone() };
        assert!(short_username.validate().is_err());
    }

    #[test]
    fn test_update_profile_request_allows_empty() {
        assert!(UpdateProfileRequest::default().validate().is_ok());

        let bad = UpdateProfileRequest { email: Some("nope".to_string()), username: None };
        assert!(bad.validate().is_err());
    }
}
