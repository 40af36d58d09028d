//! 应用状态与 HTTP 中间件
//! 请求追踪（trace_id / request_id、访问日志、指标）

use axum::{extract::Request, http::HeaderMap, http::HeaderValue, middleware::Next, response::Response};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    auth::{AuthGate, TokenService},
    config::AppConfig,
    error::AppError,
    repository::{CredentialStore, TaskStore},
    services::AuthService,
};

/// 应用状态
///
/// 所有存储都由这里显式持有并注入 handler，没有全局可变状态。
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    /// 仅在 postgres 后端下存在，用于就绪探针
    pub db: Option<sqlx::PgPool>,
    pub credentials: Arc<dyn CredentialStore>,
    pub tasks: Arc<TaskStore>,
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub auth_gate: Arc<AuthGate>,
}

impl AppState {
    /// 由配置和已选定的凭据存储组装全部服务
    pub fn new(
        config: AppConfig,
        credentials: Arc<dyn CredentialStore>,
        db: Option<sqlx::PgPool>,
    ) -> Result<Self, AppError> {
        let token_service = Arc::new(TokenService::from_config(&config)?);
        let auth_service = Arc::new(AuthService::new(credentials.clone(), token_service.clone()));
        let auth_gate = Arc::new(AuthGate::new(token_service.clone(), credentials.clone()));

        Ok(Self {
            config,
            db,
            credentials,
            tasks: Arc::new(TaskStore::new()),
            token_service,
            auth_service,
            auth_gate,
        })
    }
}

/// 请求追踪中间件
/// 为每个请求生成 trace_id 和 request_id，并记录指标
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let trace_id = extract_or_generate_trace_id(req.headers());
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    async move {
        let start = Instant::now();

        let mut response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        metrics::counter!(
            "http_requests_total",
            "method" => method.clone(),
            "status" => status.to_string()
        )
        .increment(1);
        metrics::histogram!("http_request_duration_seconds").record(elapsed.as_secs_f64());

        tracing::info!(
            method = %method,
            path = %path,
            status = status,
            elapsed_ms = elapsed.as_millis() as u64,
            "Request completed"
        );

        // 在响应头中回传 trace_id / request_id
        if let Ok(value) = HeaderValue::from_str(&trace_id) {
            response.headers_mut().insert("x-trace-id", value);
        }
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
    .instrument(span)
    .await
}

/// 从请求头中提取或生成 trace_id
fn extract_or_generate_trace_id(headers: &HeaderMap) -> String {
    headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_or_generate_trace_id() {
        let mut headers = HeaderMap::new();
        headers.insert("x-trace-id", "test-trace-123".parse().unwrap());

        let trace_id = extract_or_generate_trace_id(&headers);
        assert_eq!(trace_id, "test-trace-123");

        let headers = HeaderMap::new();
        let trace_id = extract_or_generate_trace_id(&headers);
        assert!(!trace_id.is_empty());
        assert_ne!(trace_id, "test-trace-123");
    }
}
