//! Access token issuance and validation
//! Stateless HMAC-signed JWTs carrying the subject identity and an expiry

use crate::{config::AppConfig, error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Claims carried by an access token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity key). Defaulted so that a missing claim is reported by the
    /// required-claims check instead of as a parse failure.
    #[serde(default)]
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,
}

/// Why a token was rejected. Only used for logging, callers see a single failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("signature mismatch")]
    BadSignature,
    #[error("subject claim missing")]
    MissingSubject,
    #[error("malformed token")]
    Malformed,
}

/// Token service
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    default_ttl: Duration,
}

impl TokenService {
    /// Build a service from a raw secret. Only HMAC algorithms are accepted.
    pub fn new(secret: &[u8], algorithm: Algorithm, default_ttl: Duration) -> Result<Self, AppError> {
        // Ensure secret is at least 32 bytes for HMAC
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(AppError::Config(format!("Unsupported JWT algorithm: {:?}", algorithm)));
        }

        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            validation,
            default_ttl,
        })
    }

    /// Create token service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let algorithm = Algorithm::from_str(&config.security.jwt_algorithm).map_err(|_| {
            AppError::Config(format!("Unknown JWT algorithm: {}", config.security.jwt_algorithm))
        })?;

        Self::new(
            config.security.jwt_secret.expose_secret().as_bytes(),
            algorithm,
            Duration::seconds(config.security.access_token_exp_secs as i64),
        )
    }

    /// Default lifetime of issued tokens, in seconds
    pub fn default_ttl_secs(&self) -> u64 {
        self.default_ttl.num_seconds().max(0) as u64
    }

    /// Issue a token for `subject` with the default ttl
    pub fn issue(&self, subject: &str) -> Result<String, AppError> {
        self.issue_with_ttl(subject, self.default_ttl)
    }

    /// Issue a token for `subject` that expires `ttl` after now
    pub fn issue_with_ttl(&self, subject: &str, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + ttl;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode access token: {:?}", e);
            AppError::Internal(format!("Failed to encode access token: {}", e))
        })
    }

    /// Validate and decode a token
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        TokenError::BadSignature
                    }
                    ErrorKind::MissingRequiredClaim(_) => TokenError::MissingSubject,
                    _ => TokenError::Malformed,
                };
                tracing::debug!(reason = %reason, "Token validation failed");
                reason
            })?
            .claims;

        if claims.sub.trim().is_empty() {
            tracing::debug!("Token validation failed: empty subject");
            return Err(TokenError::MissingSubject);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_32_characters_long!";

    fn service() -> TokenService {
        TokenService::new(SECRET, Algorithm::HS256, Duration::minutes(30)).unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let service = service();
        let token = service.issue("a@x.com").unwrap();

        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = service();
        let token = service.issue_with_ttl("a@x.com", Duration::seconds(-5)).unwrap();
        assert_eq!(service.validate(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(TokenService::new(b"short", Algorithm::HS256, Duration::minutes(30)).is_err());
    }

    #[test]
    fn test_asymmetric_algorithm_rejected() {
        assert!(TokenService::new(SECRET, Algorithm::RS256, Duration::minutes(30)).is_err());
    }

    #[test]
    fn test_invalid_token_fails() {
        assert_eq!(service().validate("invalid_token"), Err(TokenError::Malformed));
    }
}
