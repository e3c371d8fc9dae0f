// ============================================================================
// Portal Core - User Record Entity
// File: crates/portal-core/src/domain/user_record.rs
// Description: Managed user records and photo uploads
// ============================================================================

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::ids::string_or_number;
use crate::error::DomainError;
use portal_shared::constants::{ALLOWED_PHOTO_TYPES, MAX_PHOTO_BYTES};
use portal_shared::Pagination;

/// User record managed through the admin screens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub photo_url: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Create form
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,

    #[validate(length(min = 2, max = 100, message = "Full name must be between 2 and 100 characters"))]
    pub full_name: String,

    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Edit form; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 100, message = "Full name must be between 2 and 100 characters"))]
    pub full_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.role.is_none()
            && self.is_active.is_none()
    }
}

/// Listing filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Profile photo ready for upload
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for PhotoUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl PhotoUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, DomainError> {
        let content_type = content_type.into().to_ascii_lowercase();
        if !ALLOWED_PHOTO_TYPES.contains(&content_type.as_str()) {
            return Err(DomainError::InvalidPhoto(format!("unsupported type {}", content_type)));
        }
        if bytes.is_empty() {
            return Err(DomainError::InvalidPhoto("photo is empty".into()));
        }
        if bytes.len() > MAX_PHOTO_BYTES {
            return Err(DomainError::InvalidPhoto(format!(
                "photo is {} bytes, limit is {}",
                bytes.len(),
                MAX_PHOTO_BYTES
            )));
        }
        Ok(Self { file_name: file_name.into(), content_type, bytes })
    }

    /// Decodes a webcam capture such as `data:image/png;base64,iVBOR...`.
    pub fn from_data_url(data_url: &str, file_stem: &str) -> Result<Self, DomainError> {
        let rest = data_url
            .strip_prefix("data:")
            .ok_or_else(|| DomainError::InvalidPhoto("not a data URL".into()))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| DomainError::InvalidPhoto("data URL has no payload".into()))?;
        let content_type = meta
            .strip_suffix(";base64")
            .ok_or_else(|| DomainError::InvalidPhoto("data URL must be base64 encoded".into()))?;
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| DomainError::InvalidPhoto(e.to_string()))?;

        let extension = match content_type.to_ascii_lowercase().as_str() {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "image/webp" => "webp",
            _ => "bin",
        };
        Self::new(format!("{}.{}", file_stem, extension), content_type, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user() -> NewUser {
        NewUser {
            username: "srahma".into(),
            full_name: "Siti Rahma".into(),
            email: "siti@example.com".into(),
            phone: None,
            role: Some("operator".into()),
            password: "s3cure-pass".into(),
        }
    }

    #[test]
    fn test_new_user_validation() {
        assert!(new_user().validate().is_ok());

        let mut bad = new_user();
        bad.username = "ab".into();
        bad.password = "short".into();
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_update_validation_skips_absent_fields() {
        assert!(UserUpdate::default().validate().is_ok());
        assert!(UserUpdate::default().is_empty());

        let bad = UserUpdate { email: Some("nope".into()), ..Default::default() };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_photo_from_data_url() {
        let encoded = STANDARD.encode([0x89, b'P', b'N', b'G']);
        let photo = PhotoUpload::from_data_url(&format!("data:image/png;base64,{}", encoded), "user-7").unwrap();
        assert_eq!(photo.file_name, "user-7.png");
        assert_eq!(photo.content_type, "image/png");
        assert_eq!(photo.bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_photo_rejections() {
        assert!(PhotoUpload::from_data_url("image/png;base64,AAAA", "x").is_err());
        assert!(PhotoUpload::from_data_url("data:image/png,AAAA", "x").is_err());
        assert!(PhotoUpload::from_data_url("data:image/png;base64,@@@", "x").is_err());
        assert!(PhotoUpload::new("x.gif", "image/gif", vec![1]).is_err());
        assert!(PhotoUpload::new("x.png", "image/png", vec![]).is_err());
        assert!(PhotoUpload::new("x.png", "image/png", vec![0; MAX_PHOTO_BYTES + 1]).is_err());
    }

    #[test]
    fn test_user_record_numeric_id() {
        let record: UserRecord = serde_json::from_value(serde_json::json!({
            "id": 12, "username": "srahma", "full_name": "Siti Rahma", "email": "siti@example.com"
        }))
        .unwrap();
        assert_eq!(record.id, "12");
        assert!(record.is_active);
    }
}
