//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::{handlers, middleware::AppState};

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点
    let public_routes = Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // 需要认证的路由
    let authenticated_routes = Router::new()
        .route("/protected", get(handlers::auth::protected))
        .route(
            "/profile",
            get(handlers::user::get_profile).put(handlers::user::update_profile),
        )
        .route("/change-password", post(handlers::user::change_password))
        .route("/users", get(handlers::user::list_users))
        .route(
            "/tasks",
            get(handlers::task::list_tasks).post(handlers::task::create_task),
        )
        .route(
            "/tasks/{id}",
            get(handlers::task::get_task)
                .put(handlers::task::update_task)
                .delete(handlers::task::delete_task),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.auth_gate.clone(),
            crate::auth::middleware::require_auth,
        ));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .layer(RequestBodyLimitLayer::new(state.config.server.body_limit_bytes))
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}
