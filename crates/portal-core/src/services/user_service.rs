// ============================================================================
// Portal Core - User Service
// File: crates/portal-core/src/services/user_service.rs
// ============================================================================
//! User administration with client-side validation

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use crate::domain::{AccessToken, NewUser, PhotoUpload, UserQuery, UserRecord, UserUpdate};
use crate::error::DomainError;
use crate::repositories::UserRepository;
use portal_shared::Page;

pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, token: &AccessToken, query: UserQuery) -> Result<Page<UserRecord>, DomainError> {
        let query = UserQuery {
            pagination: query.pagination.normalized(),
            search: query
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        };
        debug!("Listing users: {:?}", query);
        self.repo.list(token, &query).await
    }

    pub async fn get(&self, token: &AccessToken, id: &str) -> Result<UserRecord, DomainError> {
        check_id(id)?;
        self.repo
            .find_by_id(token, id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user {}", id)))
    }

    pub async fn create(&self, token: &AccessToken, user: &NewUser) -> Result<UserRecord, DomainError> {
        user.validate()?;
        let created = self.repo.create(token, user).await?;
        info!("Created user {} ({})", created.id, created.username);
        Ok(created)
    }

    pub async fn update(
        &self,
        token: &AccessToken,
        id: &str,
        changes: &UserUpdate,
    ) -> Result<UserRecord, DomainError> {
        check_id(id)?;
        changes.validate()?;
        if changes.is_empty() {
            return Err(DomainError::ValidationError("No fields to update".into()));
        }
        let updated = self.repo.update(token, id, changes).await?;
        info!("Updated user {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, token: &AccessToken, id: &str) -> Result<(), DomainError> {
        check_id(id)?;
        self.repo.delete(token, id).await?;
        info!("Deleted user {}", id);
        Ok(())
    }

    pub async fn upload_photo(
        &self,
        token: &AccessToken,
        id: &str,
        photo: &PhotoUpload,
    ) -> Result<UserRecord, DomainError> {
        check_id(id)?;
        let updated = self.repo.upload_photo(token, id, photo).await?;
        info!("Uploaded {} byte photo for user {}", photo.bytes.len(), id);
        Ok(updated)
    }

    /// Webcam capture path: the photo arrives as a `data:` URL.
    pub async fn upload_photo_data_url(
        &self,
        token: &AccessToken,
        id: &str,
        data_url: &str,
    ) -> Result<UserRecord, DomainError> {
        check_id(id)?;
        let photo = PhotoUpload::from_data_url(data_url, &format!("user-{}", id))?;
        self.upload_photo(token, id, &photo).await
    }
}

/// Ids end up in backend URL paths
fn check_id(id: &str) -> Result<(), DomainError> {
    let valid = !id.is_empty()
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(DomainError::ValidationError(format!("Invalid user id: {:?}", id)))
    }
}
