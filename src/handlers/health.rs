//! 健康检查处理器
//! 提供 /、/health 和 /ready 端点

use axum::{extract::State, Json};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::{db, middleware::AppState, models::auth::MessageResponse};

/// 存活探针响应
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// 就绪探针响应
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: Vec<HealthCheck>,
}

/// 健康检查项
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// 应用启动时间（在 main.rs 中设置）
static APP_START_TIME: OnceCell<Instant> = OnceCell::new();

/// 设置应用启动时间
pub fn set_start_time() {
    let _ = APP_START_TIME.set(Instant::now());
}

/// 获取应用运行时间（秒）
pub fn get_uptime() -> u64 {
    APP_START_TIME.get().map_or(0, |start| start.elapsed().as_secs())
}

/// 欢迎信息
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to the taskgate API"))
}

/// 存活探针
/// 快速响应，不检查依赖
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: get_uptime(),
    })
}

/// 就绪探针
/// 检查凭据存储是否可用
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> Json<ReadinessResponse> {
    let mut checks = Vec::new();

    match &state.db {
        Some(pool) => {
            let db_health = db::health_check(pool).await;
            checks.push(HealthCheck {
                name: "database".to_string(),
                status: match &db_health {
                    db::HealthStatus::Healthy => "healthy".to_string(),
                    db::HealthStatus::Unhealthy(_) => "unhealthy".to_string(),
                },
                message: match db_health {
                    db::HealthStatus::Healthy => None,
                    db::HealthStatus::Unhealthy(msg) => Some(msg),
                },
            });
        }
        None => checks.push(HealthCheck {
            name: "credential_store".to_string(),
            status: "healthy".to_string(),
            message: Some("in-memory".to_string()),
        }),
    }

    let all_healthy = checks.iter().all(|c| c.status == "healthy");

    Json(ReadinessResponse {
        ready: all_healthy,
        checks,
    })
}
