//! Response envelope shared by every gateway route

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Error codes the front-end switches on. `SessionExpired` tells it to send
/// the user back to the login page; `Unauthorized` covers everything else
/// the backend refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Unauthorized,
    SessionExpired,
    NotFound,
    BadRequest,
    ValidationError,
    BackendError,
    InternalError,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    pub timestamp: DateTime<Utc>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, data: Some(data), error: None, timestamp: Utc::now() }
    }
}

impl ApiResponse<()> {
    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody { code, message: message.into() }),
            timestamp: Utc::now(),
        }
    }
}
