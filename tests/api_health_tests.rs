//! 健康检查 API 集成测试

use axum::http::StatusCode;

mod common;
use common::{create_test_app, send};

#[tokio::test]
async fn test_root_endpoint() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert!(json["uptime_secs"].is_number());
}

#[tokio::test]
async fn test_readiness_endpoint_with_memory_store() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/ready", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ready"], true);

    let checks = json["checks"].as_array().unwrap();
    assert_eq!(checks.len(), 1);
    assert_eq!(checks[0]["name"], "credential_store");
    assert_eq!(checks[0]["status"], "healthy");
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = create_test_app();

    let (status, _) = send(&app, "GET", "/does-not-exist", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
