//! Process-lifetime credential store

use crate::{
    error::AppError,
    models::user::{Credential, NewCredential},
    repository::CredentialStore,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Credentials keyed by identity key, held in memory for the life of the process
#[derive(Default)]
pub struct InMemoryCredentialStore {
    credentials: RwLock<HashMap<String, Credential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn register(&self, new: NewCredential) -> Result<Credential, AppError> {
        let mut credentials = self.credentials.write().await;

        if credentials.contains_key(&new.email) {
            return Err(AppError::DuplicateIdentity);
        }

        let now = Utc::now();
        let credential = Credential {
            id: Uuid::new_v4(),
            email: new.email,
            username: new.username,
            password_hash: new.password_hash,
            created_at: now,
            updated_at: now,
        };
        credentials.insert(credential.email.clone(), credential.clone());

        Ok(credential)
    }

    async fn find(&self, email: &str) -> Result<Option<Credential>, AppError> {
        Ok(self.credentials.read().await.get(email).cloned())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Credential, AppError> {
        let mut credentials = self.credentials.write().await;

        let current_key = credentials
            .values()
            .find(|c| c.id == id)
            .map(|c| c.email.clone())
            .ok_or(AppError::NotFound("User"))?;

        if let Some(new_email) = email {
            if new_email != current_key && credentials.contains_key(new_email) {
                return Err(AppError::IdentityInUse);
            }
        }

        let mut credential = credentials
            .remove(&current_key)
            .ok_or(AppError::NotFound("User"))?;

        if let Some(username) = username {
            credential.username = username.to_string();
        }
        if let Some(email) = email {
            credential.email = email.to_string();
        }
        credential.updated_at = Utc::now();

        credentials.insert(credential.email.clone(), credential.clone());

        Ok(credential)
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), AppError> {
        let mut credentials = self.credentials.write().await;

        let credential = credentials
            .values_mut()
            .find(|c| c.id == id)
            .ok_or(AppError::NotFound("User"))?;
        credential.password_hash = password_hash.to_string();
        credential.updated_at = Utc::now();

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Credential>, AppError> {
        let mut all: Vec<Credential> = self.credentials.read().await.values().cloned().collect();
        all.sort_by_key(|c| c.created_at);
        Ok(all)
    }
}
