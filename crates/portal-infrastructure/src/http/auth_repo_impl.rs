// ============================================================================
// Portal Infrastructure - HTTP Auth Repository
// File: crates/portal-infrastructure/src/http/auth_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use tracing::info;

use portal_core::domain::{AccessToken, Credentials, LoginResult, UserInfo, UserPreferences};
use portal_core::error::DomainError;
use portal_core::repositories::AuthRepository;

use super::client::BackendClient;

pub struct HttpAuthRepository {
    client: BackendClient,
}

impl HttpAuthRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

// `data` of `POST /auth/login`
#[derive(Deserialize)]
struct LoginData {
    #[serde(alias = "access_token")]
    token: String,
    #[serde(alias = "user")]
    user_info: UserInfo,
    #[serde(default)]
    preferences: Option<UserPreferences>,
}

#[async_trait]
impl AuthRepository for HttpAuthRepository {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResult, DomainError> {
        let url = self.client.url("/auth/login")?;
        let request = self.client.request(Method::POST, url, None).json(credentials);

        let data: LoginData = self.client.send(request).await.map_err(|e| match e {
            DomainError::Unauthorized(_) => DomainError::InvalidCredentials,
            other => other,
        })?;

        info!("Backend accepted login for user {}", data.user_info.id);
        Ok(LoginResult {
            token: AccessToken::new(data.token),
            user: data.user_info,
            preferences: data.preferences.unwrap_or_default(),
        })
    }

    async fn logout(&self, token: &AccessToken) -> Result<(), DomainError> {
        let url = self.client.url("/auth/logout")?;
        self.client.execute(self.client.request(Method::POST, url, Some(token))).await?;
        Ok(())
    }
}
