//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    #[error("Malformed menu: {0}")]
    MalformedMenu(String),

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    #[error("Invalid photo: {0}")]
    InvalidPhoto(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
