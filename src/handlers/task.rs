//! 待办任务的 HTTP 处理器

use crate::{
    auth::CurrentUser,
    error::AppError,
    extract::AppJson,
    middleware::AppState,
    models::{
        auth::MessageResponse,
        task::{CreateTaskQuery, Task, TaskId},
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// 创建任务
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    Query(query): Query<CreateTaskQuery>,
    AppJson(task): AppJson<Task>,
) -> Result<impl IntoResponse, AppError> {
    task.validate()?;

    let task_id = state.tasks.create(query.task_id, task.clone()).await?;

    tracing::info!(task_id, owner = %current_user.identity(), "Task created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Task created successfully",
            "task_id": task_id,
            "task": task,
        })),
    ))
}

/// 列出任务
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    _current_user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.tasks.list().await))
}

/// 获取任务详情
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    _current_user: CurrentUser,
    Path(id): Path<TaskId>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.tasks.get(id).await?))
}

/// 更新任务
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    _current_user: CurrentUser,
    Path(id): Path<TaskId>,
    AppJson(task): AppJson<Task>,
) -> Result<impl IntoResponse, AppError> {
    task.validate()?;

    let task = state.tasks.update(id, task).await?;

    Ok(Json(json!({
        "message": "Task updated successfully",
        "task": task,
    })))
}

/// 删除任务
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    Path(id): Path<TaskId>,
) -> Result<impl IntoResponse, AppError> {
    state.tasks.delete(id).await?;

    tracing::info!(task_id = id, owner = %current_user.identity(), "Task deleted");

    Ok(Json(MessageResponse::new("Task deleted successfully")))
}
