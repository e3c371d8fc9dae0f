//! User repository trait (port)

use async_trait::async_trait;

use crate::domain::{AccessToken, NewUser, PhotoUpload, UserQuery, UserRecord, UserUpdate};
use crate::error::DomainError;
use portal_shared::Page;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self, token: &AccessToken, query: &UserQuery) -> Result<Page<UserRecord>, DomainError>;
    async fn find_by_id(&self, token: &AccessToken, id: &str) -> Result<Option<UserRecord>, DomainError>;
    async fn create(&self, token: &AccessToken, user: &NewUser) -> Result<UserRecord, DomainError>;
    async fn update(&self, token: &AccessToken, id: &str, changes: &UserUpdate) -> Result<UserRecord, DomainError>;
    async fn delete(&self, token: &AccessToken, id: &str) -> Result<(), DomainError>;
    async fn upload_photo(
        &self,
        token: &AccessToken,
        id: &str,
        photo: &PhotoUpload,
    ) -> Result<UserRecord, DomainError>;
}
