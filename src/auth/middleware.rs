//! 认证中间件
//! 在受保护路由上运行 AuthGate，并把解析出的凭据挂到请求扩展上

use crate::{auth::gate::AuthGate, error::AppError, models::user::Credential};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// 当前已认证用户（附加到请求扩展）
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Credential);

impl CurrentUser {
    /// 身份键（规范化后的邮箱）
    pub fn identity(&self) -> &str {
        &self.0.email
    }
}

// 实现 FromRequestParts 以便在 handler 中直接提取 CurrentUser
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::InvalidToken)
    }
}

/// 认证中间件 - 必须认证
pub async fn require_auth(
    State(gate): State<Arc<AuthGate>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let credential = gate.authenticate(authorization.as_deref()).await.map_err(|e| {
        tracing::debug!(reason = %e, "Authentication failed");
        AppError::from(e)
    })?;

    // 附加到请求扩展
    req.extensions_mut().insert(CurrentUser(credential));

    Ok(next.run(req).await)
}
