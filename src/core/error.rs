//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// 核心错误类型
///
/// 响应体一律为纯文本；内部错误的细节只写日志，不返回给调用方。
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// 缺失或格式错误的查询参数
    #[error("{0}")]
    BadRequest(String),
    /// 主键冲突，携带说明信息
    #[error("{0}")]
    Conflict(String),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl CoreError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::Conflict(_) | CoreError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            CoreError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            CoreError::BadRequest(msg) | CoreError::Conflict(msg) => msg,
            CoreError::ServiceUnavailable(_) => "service unavailable".to_string(),
            CoreError::InternalServerError(_) => "internal server error".to_string(),
        };

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                CoreError::Conflict(db_err.message().to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                CoreError::ServiceUnavailable(err.to_string())
            }
            _ => CoreError::InternalServerError(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("invalid parameter '{}'", field))
                })
            })
            .collect();
        messages.sort();

        CoreError::BadRequest(messages.join(", "))
    }
}
