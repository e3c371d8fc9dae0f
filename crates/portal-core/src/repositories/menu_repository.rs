//! Menu and preferences repository trait (port)

use async_trait::async_trait;

use crate::domain::{AccessToken, MenuPayload, UserPreferences};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// `GET /user/menus`
    async fn fetch_user_menus(&self, token: &AccessToken) -> Result<MenuPayload, DomainError>;
    async fn fetch_preferences(&self, token: &AccessToken) -> Result<UserPreferences, DomainError>;
    async fn save_preferences(
        &self,
        token: &AccessToken,
        preferences: &UserPreferences,
    ) -> Result<(), DomainError>;
}
