//! Authentication repository trait (port)

use async_trait::async_trait;

use crate::domain::{AccessToken, Credentials, LoginResult};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResult, DomainError>;
    async fn logout(&self, token: &AccessToken) -> Result<(), DomainError>;
}
