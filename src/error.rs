//! 统一错误模型
//! 定义所有错误类型和错误响应格式

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Email already registered")]
    DuplicateIdentity,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Email already in use")]
    IdentityInUse,

    #[error("Current password is incorrect")]
    WrongPassword,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Task ID already exists")]
    TaskExists,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::DuplicateIdentity
            | AppError::InvalidCredentials
            | AppError::IdentityInUse
            | AppError::WrongPassword
            | AppError::TaskExists
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidToken => "Could not validate credentials".to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Database(_) => "Database error occurred".to_string(),
            AppError::Config(_) => "Configuration error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// 获取错误码
    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }
}

/// 错误响应 DTO
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: u16,
    pub message: String,
    pub request_id: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: self.code(),
                message: self.user_message(),
                request_id,
            },
        };

        // 记录错误日志：服务端错误记 error，客户端错误记 warn
        if status.is_server_error() {
            tracing::error!(
                code = self.code(),
                message = %self,
                request_id = %error_response.error.request_id,
                "Application error"
            );
        } else {
            tracing::warn!(
                code = self.code(),
                message = %self,
                request_id = %error_response.error.request_id,
                "Request rejected"
            );
        }

        let mut response = (status, Json(error_response)).into_response();

        // 401 响应附带 Bearer 质询
        if matches!(self, AppError::InvalidToken) {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

/// 请求体字段校验失败
impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// 请求体无法解析为目标类型（缺字段、类型错误、非 JSON）
impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::Validation(e.body_text())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::InvalidToken.code(), 401);
        assert_eq!(AppError::NotFound("Task").code(), 404);
        assert_eq!(AppError::DuplicateIdentity.code(), 400);
        assert_eq!(AppError::InvalidCredentials.code(), 400);
        assert_eq!(AppError::IdentityInUse.code(), 400);
        assert_eq!(AppError::WrongPassword.code(), 400);
        assert_eq!(AppError::TaskExists.code(), 400);
        assert_eq!(AppError::Internal("boom".to_string()).code(), 500);
    }

    #[test]
    fn test_user_message_no_sensitive_info() {
        let error = AppError::Database(sqlx::Error::RowNotFound);
        let message = error.user_message();
        assert_eq!(message, "Database error occurred");
        assert!(!message.contains("sqlx"));

        let error = AppError::Internal("argon2 params rejected".to_string());
        assert_eq!(error.user_message(), "Internal server error");
    }

    #[test]
    fn test_not_found_message_names_resource() {
        assert_eq!(AppError::NotFound("Task").user_message(), "Task not found");
    }

    #[test]
    fn test_invalid_token_carries_bearer_challenge() {
        let response = AppError::InvalidToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");

        let response = AppError::WrongPassword.into_response();
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    }
}
