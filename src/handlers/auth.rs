//! 认证相关的 HTTP 处理器

use crate::{
    auth::CurrentUser,
    error::AppError,
    extract::AppJson,
    middleware::AppState,
    models::{
        auth::{LoginRequest, MessageResponse},
        user::RegisterRequest,
    },
};
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// 注册
pub async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    state.auth_service.register(req).await?;

    Ok(Json(MessageResponse::new("User registered successfully")))
}

/// 登录
pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth_service.login(&req.email, &req.password).await?;

    Ok(Json(response))
}

/// 需要认证的示例路由
pub async fn protected(current_user: CurrentUser) -> Result<impl IntoResponse, AppError> {
    let CurrentUser(credential) = current_user;

    Ok(Json(json!({
        "message": "This is a protected route",
        "user": {
            "email": credential.email,
            "username": credential.username,
        }
    })))
}
