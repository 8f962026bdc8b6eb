//! 错误处理模块
//!
//! 定义应用程序的错误类型和错误处理逻辑。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 缺少搜索词时返回的消息
pub const MISSING_TERM_MESSAGE: &str = "Missing search term";

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 参数验证错误
    #[error("{0}")]
    Validation(String),

    /// 网络传输错误
    #[error("Search request failed: {0}")]
    Transport(String),

    /// 搜索引擎返回非成功状态
    #[error("Search engine returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// 请求体解码错误
    #[error("Body decode error: {0}")]
    Decode(String),

    /// 请求签名错误
    #[error("Request signing failed: {0}")]
    Signing(String),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// 缺少搜索词
    pub fn missing_term() -> Self {
        AppError::Validation(MISSING_TERM_MESSAGE.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::Serialization(e.to_string())
        } else {
            AppError::Transport(e.to_string())
        }
    }
}

impl From<base64::DecodeError> for AppError {
    fn from(e: base64::DecodeError) -> Self {
        AppError::Decode(e.to_string())
    }
}

impl From<std::string::FromUtf8Error> for AppError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        AppError::Decode(e.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

/// Axum response implementation for AppError
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(&self.to_string()));
        (self.status_code(), body).into_response()
    }
}

/// 错误响应
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    /// 固定为 false
    pub status: bool,
    /// 错误消息
    pub message: String,
}

impl ErrorResponse {
    /// 创建新错误响应
    pub fn new(message: &str) -> Self {
        Self {
            status: false,
            message: message.to_string(),
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;
