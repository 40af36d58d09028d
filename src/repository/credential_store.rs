//! Credential store abstraction
//!
//! Every identity key handed to a store is expected to be normalized already
//! (see [`crate::models::user::normalize_identity`]); stores compare keys exactly.

use crate::{
    error::AppError,
    models::user::{Credential, NewCredential},
};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persist a new credential. Fails with [`AppError::DuplicateIdentity`] when the
    /// identity key is taken; the existing credential is left untouched.
    async fn register(&self, credential: NewCredential) -> Result<Credential, AppError>;

    /// Exact-match lookup by identity key
    async fn find(&self, email: &str) -> Result<Option<Credential>, AppError>;

    /// Change the display name and/or identity key of a credential.
    /// Fails with [`AppError::IdentityInUse`] when `email` belongs to another credential.
    async fn update_profile(
        &self,
        id: Uuid,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Credential, AppError>;

    /// Replace the stored password hash
    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), AppError>;

    /// All credentials, oldest first
    async fn list(&self) -> Result<Vec<Credential>, AppError>;
}
