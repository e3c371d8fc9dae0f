//! HTTP-facing errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use portal_core::DomainError;

use crate::response::{ApiResponse, ErrorCode};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Backend error: {0}")]
    BadGateway(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidCredentials => ApiError::Unauthorized(e.to_string()),
            DomainError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            DomainError::NotFound(_) | DomainError::MenuItemNotFound(_) => ApiError::NotFound(e.to_string()),
            DomainError::InvalidRoute(_) | DomainError::InvalidPhoto(_) => ApiError::BadRequest(e.to_string()),
            DomainError::ValidationError(msg) => ApiError::Validation(msg),
            DomainError::BackendError(_) | DomainError::MalformedMenu(_) => ApiError::BadGateway(e.to_string()),
            DomainError::StorageError(_) | DomainError::SerializationError(_) => {
                ApiError::InternalError(e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, msg)
            }
            ApiError::SessionExpired(msg) => {
                tracing::debug!("Session expired: {}", msg);
                (StatusCode::UNAUTHORIZED, ErrorCode::SessionExpired, msg)
            }
            ApiError::NotFound(msg) => {
                tracing::debug!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg)
            }
            ApiError::Validation(msg) => {
                tracing::warn!("Validation error: {}", msg);
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::ValidationError, msg)
            }
            ApiError::BadGateway(msg) => {
                tracing::error!("Backend error: {}", msg);
                (StatusCode::BAD_GATEWAY, ErrorCode::BackendError, msg)
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError, msg)
            }
        };

        (status, Json(ApiResponse::failure(code, message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_mapping() {
        assert!(matches!(ApiError::from(DomainError::InvalidCredentials), ApiError::Unauthorized(_)));
        assert!(matches!(ApiError::from(DomainError::MenuItemNotFound("9".into())), ApiError::NotFound(_)));
        assert!(matches!(ApiError::from(DomainError::BackendError("down".into())), ApiError::BadGateway(_)));
        assert!(matches!(ApiError::from(DomainError::ValidationError("x".into())), ApiError::Validation(_)));
    }

    #[test]
    fn test_status_codes() {
        let response = ApiError::Validation("bad".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = ApiError::BadGateway("down".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = ApiError::SessionExpired("gone".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
