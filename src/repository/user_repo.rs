//! User repository (数据库访问层)
//! PostgreSQL 实现的凭据存储，邮箱唯一性由数据库唯一约束保证

use crate::{
    error::AppError,
    models::user::{Credential, NewCredential},
    repository::CredentialStore,
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgCredentialStore {
    db: PgPool,
}

impl PgCredentialStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// 唯一约束冲突（并发重复注册时后提交者会落到这里）
fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    /// 创建用户
    async fn register(&self, new: NewCredential) -> Result<Credential, AppError> {
        sqlx::query_as::<_, Credential>(
            r#"
            INSERT INTO users (id, email, username, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.email)
        .bind(&new.username)
        .bind(&new.password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateIdentity
            } else {
                AppError::Database(e)
            }
        })
    }

    /// 根据邮箱查找用户
    async fn find(&self, email: &str) -> Result<Option<Credential>, AppError> {
        let credential = sqlx::query_as::<_, Credential>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db)
            .await?;

        Ok(credential)
    }

    /// 更新用户名 / 邮箱
    async fn update_profile(
        &self,
        id: Uuid,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Credential, AppError> {
        sqlx::query_as::<_, Credential>(
            r#"
            UPDATE users
            SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(username)
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::IdentityInUse
            } else {
                AppError::Database(e)
            }
        })?
        .ok_or(AppError::NotFound("User"))
    }

    /// 更新密码
    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET
                password_hash = $2,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User"));
        }

        Ok(())
    }

    /// 列出所有用户
    async fn list(&self) -> Result<Vec<Credential>, AppError> {
        let credentials =
            sqlx::query_as::<_, Credential>("SELECT * FROM users ORDER BY created_at ASC")
                .fetch_all(&self.db)
                .await?;

        Ok(credentials)
    }
}
