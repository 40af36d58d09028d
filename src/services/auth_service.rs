//! 认证服务：注册、登录、资料更新、修改密码

use crate::{
    auth::{jwt::TokenService, password::PasswordHasher},
    error::AppError,
    models::{
        auth::TokenResponse,
        user::{normalize_identity, Credential, NewCredential, RegisterRequest},
    },
    repository::CredentialStore,
};
use std::sync::Arc;

pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    tokens: Arc<TokenService>,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(credentials: Arc<dyn CredentialStore>, tokens: Arc<TokenService>) -> Self {
        Self {
            credentials,
            tokens,
            hasher: PasswordHasher::new(),
        }
    }

    /// 用户注册
    pub async fn register(&self, req: RegisterRequest) -> Result<Credential, AppError> {
        let email = normalize_identity(&req.email);

        // 先查一次，避免为已存在的邮箱做无用的哈希计算；最终由存储层保证唯一
        if self.credentials.find(&email).await?.is_some() {
            tracing::warn!(%email, "Registration attempt with existing email");
            return Err(AppError::DuplicateIdentity);
        }

        let password_hash = self.hasher.hash(&req.password)?;

        let credential = self
            .credentials
            .register(NewCredential {
                email,
                username: req.username,
                password_hash,
            })
            .await?;

        tracing::info!(email = %credential.email, "User registered successfully");
        Ok(credential)
    }

    /// 用户登录
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, AppError> {
        let email = normalize_identity(email);

        // 未知邮箱也做一次完整的哈希校验，两条失败路径耗时一致
        let credential = match self.credentials.find(&email).await? {
            Some(credential) if self.hasher.verify(password, &credential.password_hash) => {
                credential
            }
            Some(_) => {
                tracing::warn!(%email, "Failed login attempt");
                return Err(AppError::InvalidCredentials);
            }
            None => {
                self.hasher.verify_dummy(password);
                tracing::warn!(%email, "Failed login attempt");
                return Err(AppError::InvalidCredentials);
            }
        };

        let access_token = self.tokens.issue(&credential.email)?;

        tracing::info!(email = %credential.email, "Successful login");
        Ok(TokenResponse::bearer(access_token, self.tokens.default_ttl_secs()))
    }

    /// 更新用户名 / 邮箱
    pub async fn update_profile(
        &self,
        current: &Credential,
        username: Option<String>,
        email: Option<String>,
    ) -> Result<Credential, AppError> {
        let email = email.as_deref().map(normalize_identity);

        let updated = self
            .credentials
            .update_profile(current.id, username.as_deref(), email.as_deref())
            .await?;

        if updated.email != current.email {
            tracing::info!(from = %current.email, to = %updated.email, "User changed email");
        }

        Ok(updated)
    }

    /// 修改密码
    pub async fn change_password(
        &self,
        current: &Credential,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if !self.hasher.verify(current_password, &current.password_hash) {
            tracing::warn!(email = %current.email, "Password change with wrong current password");
            return Err(AppError::WrongPassword);
        }

        let new_hash = self.hasher.hash(new_password)?;
        self.credentials
            .update_password_hash(current.id, &new_hash)
            .await?;

        tracing::info!(email = %current.email, "Password changed");
        Ok(())
    }
}
