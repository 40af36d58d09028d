//! 测试公共模块
//! 提供测试配置、内存后端的应用状态和请求辅助函数

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use secrecy::Secret;
use serde_json::Value;
use std::sync::Arc;
use taskgate::{
    config::{
        AppConfig, DatabaseConfig, LoggingConfig, SecurityConfig, ServerConfig, StoreBackend,
        StoreConfig,
    },
    middleware::AppState,
    repository::InMemoryCredentialStore,
};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-min-32-chars";

/// 创建测试配置（内存存储后端，不需要数据库）
pub fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(),
            graceful_shutdown_timeout_secs: 5,
            body_limit_bytes: 64 * 1024,
        },
        database: DatabaseConfig {
            url: std::env::var("TEST_DATABASE_URL").ok().map(Secret::new),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            jwt_secret: Secret::new(TEST_SECRET.to_string()),
            jwt_algorithm: "HS256".to_string(),
            access_token_exp_secs: 1800,
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
        },
    }
}

/// 创建测试应用状态
pub fn create_test_app_state() -> Arc<AppState> {
    let config = create_test_config();
    let credentials = Arc::new(InMemoryCredentialStore::new());

    Arc::new(AppState::new(config, credentials, None).expect("Failed to build app state"))
}

/// 创建测试路由
pub fn create_test_app() -> Router {
    taskgate::routes::create_router(create_test_app_state())
}

/// 发送请求并返回状态码与 JSON 响应体（空响应体返回 Null）
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// 注册用户
pub async fn register(app: &Router, email: &str, username: &str, password: &str) -> StatusCode {
    let (status, _) = send(
        app,
        "POST",
        "/register",
        None,
        Some(serde_json::json!({
            "email": email,
            "username": username,
            "password": password,
        })),
    )
    .await;

    status
}

/// 登录并返回 access_token
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/login",
        None,
        Some(serde_json::json!({ "email": email, "password": password })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["access_token"].as_str().unwrap().to_string()
}

/// 注册并登录默认测试用户
pub async fn setup_user(app: &Router) -> String {
    assert_eq!(register(app, "a@x.com", "alice", "password123").await, StatusCode::OK);
    login(app, "a@x.com", "password123").await
}
