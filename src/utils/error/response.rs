//! HTTP response handling for errors

use super::types::ShopError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ShopError {
    /// Status code and stable error code for this error
    fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            ShopError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            ShopError::Registry(_) => (StatusCode::INTERNAL_SERVER_ERROR, "REGISTRY_ERROR"),
            ShopError::Auth(_) => (StatusCode::UNAUTHORIZED, "AUTH_ERROR"),
            ShopError::Unauthorized(_) | ShopError::Jwt(_) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
            }
            ShopError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ShopError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ShopError::BadRequest(_) | ShopError::Serialization(_) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST")
            }
            ShopError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ShopError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ShopError::Yaml(_)
            | ShopError::Io(_)
            | ShopError::Crypto(_)
            | ShopError::Storage(_)
            | ShopError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl ResponseError for ShopError {
    fn status_code(&self) -> StatusCode {
        self.classify().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code) = self.classify();

        // Internal details stay in the logs
        let message = if status_code.is_server_error() {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let error_response = ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
