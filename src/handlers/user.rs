//! 用户资料的 HTTP 处理器

use crate::{
    auth::CurrentUser,
    error::AppError,
    extract::AppJson,
    middleware::AppState,
    models::{
        auth::MessageResponse,
        user::{ChangePasswordRequest, UpdateProfileRequest, UserResponse},
    },
};
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

/// 获取当前用户资料
pub async fn get_profile(current_user: CurrentUser) -> Result<impl IntoResponse, AppError> {
    Ok(Json(UserResponse::from(current_user.0)))
}

/// 更新当前用户资料
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    AppJson(req): AppJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let updated = state
        .auth_service
        .update_profile(&current_user.0, req.username, req.email)
        .await?;

    Ok(Json(UserResponse::from(updated)))
}

/// 修改密码
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    AppJson(req): AppJson<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    state
        .auth_service
        .change_password(&current_user.0, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password changed successfully")))
}

/// 列出用户
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _current_user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let users: Vec<UserResponse> = state
        .credentials
        .list()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(users))
}
