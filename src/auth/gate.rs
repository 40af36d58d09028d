//! Request authentication gate
//!
//! Resolves the `Authorization` header of a request to a stored [`Credential`]:
//! `NoToken -> TokenPresent -> {Valid, Invalid}`. The gate knows nothing about HTTP
//! responses; callers translate [`AuthError`] at the transport boundary.

use crate::{
    auth::jwt::{TokenError, TokenService},
    error::AppError,
    models::user::Credential,
    repository::CredentialStore,
};
use std::sync::Arc;

/// Reasons a request fails authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("authorization header missing")]
    MissingToken,

    #[error("authorization header is not a bearer token")]
    MalformedHeader,

    #[error("token rejected: {0}")]
    InvalidToken(#[from] TokenError),

    #[error("token subject has no credential")]
    UnknownSubject,

    /// The credential lookup itself failed; this is not an authentication failure
    #[error("credential lookup failed: {0}")]
    Store(AppError),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Store(inner) => inner,
            _ => AppError::InvalidToken,
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` value.
/// The scheme name is matched case-insensitively.
pub fn extract_bearer(authorization: &str) -> Option<&str> {
    let (scheme, token) = authorization.trim().split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

pub struct AuthGate {
    tokens: Arc<TokenService>,
    credentials: Arc<dyn CredentialStore>,
}

impl AuthGate {
    pub fn new(tokens: Arc<TokenService>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            tokens,
            credentials,
        }
    }

    /// Authenticate a request from the raw value of its `Authorization` header
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<Credential, AuthError> {
        let header = authorization.ok_or(AuthError::MissingToken)?;
        let token = extract_bearer(header).ok_or(AuthError::MalformedHeader)?;

        let claims = self.tokens.validate(token)?;

        self.credentials
            .find(&claims.sub)
            .await
            .map_err(AuthError::Store)?
            .ok_or(AuthError::UnknownSubject)
    }
}
