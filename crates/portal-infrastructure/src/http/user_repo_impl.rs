// ============================================================================
// Portal Infrastructure - HTTP User Repository
// File: crates/portal-infrastructure/src/http/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;

use portal_core::domain::{AccessToken, NewUser, PhotoUpload, UserQuery, UserRecord, UserUpdate};
use portal_core::error::DomainError;
use portal_core::repositories::UserRepository;
use portal_shared::Page;

use super::client::BackendClient;

pub struct HttpUserRepository {
    client: BackendClient,
}

impl HttpUserRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    fn user_url(&self, id: &str) -> Result<reqwest::Url, DomainError> {
        self.client.url(&format!("/users/{}", id))
    }
}

#[async_trait]
impl UserRepository for HttpUserRepository {
    async fn list(&self, token: &AccessToken, query: &UserQuery) -> Result<Page<UserRecord>, DomainError> {
        let mut url = self.client.url("/users")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("page", &query.pagination.page.to_string())
                .append_pair("per_page", &query.pagination.per_page.to_string());
            if let Some(search) = query.search.as_deref() {
                pairs.append_pair("search", search);
            }
        }
        self.client.send(self.client.request(Method::GET, url, Some(token))).await
    }

    async fn find_by_id(&self, token: &AccessToken, id: &str) -> Result<Option<UserRecord>, DomainError> {
        let url = self.user_url(id)?;
        match self.client.send(self.client.request(Method::GET, url, Some(token))).await {
            Ok(record) => Ok(Some(record)),
            Err(DomainError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create(&self, token: &AccessToken, user: &NewUser) -> Result<UserRecord, DomainError> {
        let url = self.client.url("/users")?;
        let request = self.client.request(Method::POST, url, Some(token)).json(user);
        self.client.send(request).await
    }

    async fn update(&self, token: &AccessToken, id: &str, changes: &UserUpdate) -> Result<UserRecord, DomainError> {
        let url = self.user_url(id)?;
        let request = self.client.request(Method::PUT, url, Some(token)).json(changes);
        self.client.send(request).await
    }

    async fn delete(&self, token: &AccessToken, id: &str) -> Result<(), DomainError> {
        let url = self.user_url(id)?;
        self.client.execute(self.client.request(Method::DELETE, url, Some(token))).await?;
        Ok(())
    }

    async fn upload_photo(
        &self,
        token: &AccessToken,
        id: &str,
        photo: &PhotoUpload,
    ) -> Result<UserRecord, DomainError> {
        let url = self.client.url(&format!("/users/{}/photo", id))?;
        let part = Part::bytes(photo.bytes.clone())
            .file_name(photo.file_name.clone())
            .mime_str(&photo.content_type)
            .map_err(|e| DomainError::InvalidPhoto(e.to_string()))?;
        let request = self
            .client
            .request(Method::POST, url, Some(token))
            .multipart(Form::new().part("photo", part));
        self.client.send(request).await
    }
}
