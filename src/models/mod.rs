//! 数据模型模块
//! 用户凭据、认证请求/响应与待办任务

pub mod auth;
pub mod task;
pub mod user;
