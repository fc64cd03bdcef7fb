//! 核心错误处理模块

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::app::catalog::repository::RepositoryError;

/// 核心错误类型
#[derive(Debug)]
pub enum CoreError {
    BadRequest(String),
    NotFound(String),
    InternalServerError(String),
}

/// 错误响应结构
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let (status, error_message, user_message) = match self {
            CoreError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            CoreError::InternalServerError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                msg,
            ),
        };

        let error_response = ErrorResponse {
            error: error_message.to_string(),
            message: user_message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}

impl From<RepositoryError> for CoreError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::InvalidInput(msg) => CoreError::BadRequest(msg),
            // 存储层细节只写日志，不返回给调用方
            other => {
                error!("存储错误: {}", other);
                CoreError::InternalServerError("存储服务暂不可用".to_string())
            }
        }
    }
}

impl From<JsonRejection> for CoreError {
    fn from(rejection: JsonRejection) -> Self {
        CoreError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CoreError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CoreError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CoreError::InternalServerError("x".into())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_error_mapping() {
        let invalid: CoreError = RepositoryError::InvalidInput("name: 不能为空".into()).into();
        assert!(matches!(invalid, CoreError::BadRequest(msg) if msg.contains("name")));

        let storage: CoreError = RepositoryError::Storage("connection refused".into()).into();
        match storage {
            CoreError::InternalServerError(msg) => assert!(!msg.contains("connection refused")),
            other => panic!("unexpected mapping: {:?}", other),
        }

        let corrupted: CoreError = RepositoryError::Corrupted {
            id: "602d2149e773f2a3990b47f5".into(),
            message: "missing field `name`".into(),
        }
        .into();
        assert!(matches!(corrupted, CoreError::InternalServerError(_)));
    }
}
