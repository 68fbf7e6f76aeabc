use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::external::FetchError;
use crate::models::ValidationError;

/// 统一的API错误类型
#[derive(Debug)]
pub enum ApiError {
    /// 未找到资源
    NotFound(String),
    /// 验证错误
    Validation(String),
    /// 内部服务器错误
    Internal(String),
    /// 外部服务错误
    ExternalService(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::ExternalService(msg) => write!(f, "External service error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// 从FetchError转换
impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotConfigured => ApiError::Internal(err.to_string()),
            _ => ApiError::ExternalService(err.to_string()),
        }
    }
}

/// 从ValidationError转换
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ExternalService(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// 实现IntoResponse，将错误转换为HTTP响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error_type, message) = match self {
            ApiError::NotFound(msg) => ("not_found", msg),
            ApiError::Validation(msg) => ("validation_error", msg),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("internal_error", "An internal server error occurred".to_string())
            }
            ApiError::ExternalService(msg) => {
                tracing::error!("External service error: {}", msg);
                ("external_service_error", msg)
            }
        };

        let body = Json(json!({
            "success": false,
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ApiError::NotFound("Route not found".to_string());
        assert_eq!(error.to_string(), "Not found: Route not found");
    }

    #[test]
    fn test_fetch_error_conversion() {
        let api_error: ApiError = FetchError::HttpStatus(503).into();
        assert!(matches!(api_error, ApiError::ExternalService(_)));
        assert_eq!(api_error.status_code(), StatusCode::BAD_GATEWAY);

        let api_error: ApiError = FetchError::NotConfigured.into();
        assert_eq!(api_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_error_conversion() {
        let api_error: ApiError = ValidationError::UnknownMovieType("film".to_string()).into();
        assert!(matches!(api_error, ApiError::Validation(_)));
        assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);

        let api_error: ApiError = ValidationError::InvalidPage("abc".to_string()).into();
        assert_eq!(api_error.to_string(), "Validation error: Invalid page number: abc");
    }
}
