// ============================================================================
// Portal Infrastructure - HTTP Menu Repository
// File: crates/portal-infrastructure/src/http/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use portal_core::domain::{AccessToken, MenuPayload, UserPreferences};
use portal_core::error::DomainError;
use portal_core::repositories::MenuRepository;

use super::client::BackendClient;

pub struct HttpMenuRepository {
    client: BackendClient,
}

impl HttpMenuRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MenuRepository for HttpMenuRepository {
    async fn fetch_user_menus(&self, token: &AccessToken) -> Result<MenuPayload, DomainError> {
        let url = self.client.url("/user/menus")?;
        self.client.send(self.client.request(Method::GET, url, Some(token))).await
    }

    async fn fetch_preferences(&self, token: &AccessToken) -> Result<UserPreferences, DomainError> {
        let url = self.client.url("/user/preferences")?;
        // users that never saved anything get an empty bundle
        let data = self.client.execute(self.client.request(Method::GET, url, Some(token))).await?;
        match data {
            Some(value) if !value.is_null() => serde_json::from_value(value)
                .map_err(|e| DomainError::BackendError(format!("Unexpected preferences data: {}", e))),
            _ => Ok(UserPreferences::default()),
        }
    }

    async fn save_preferences(
        &self,
        token: &AccessToken,
        preferences: &UserPreferences,
    ) -> Result<(), DomainError> {
        let url = self.client.url("/user/preferences")?;
        let request = self.client.request(Method::POST, url, Some(token)).json(preferences);
        self.client.execute(request).await?;
        debug!("Preferences saved");
        Ok(())
    }
}
