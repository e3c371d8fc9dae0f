//! Authenticated account entities

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::ids::string_or_number;
use super::preferences::UserPreferences;

/// Profile of the logged-in user as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(alias = "full_name", alias = "display_name")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, alias = "photo_url", alias = "photo", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Bearer token issued by the backend at login
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Login form
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Result of a successful backend login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: AccessToken,
    pub user: UserInfo,
    pub preferences: UserPreferences,
}

/// Body of `GET /user/menus`
#[derive(Debug, Clone, Deserialize)]
pub struct MenuPayload {
    /// Unconverted tree
    pub menus: Value,
    #[serde(default)]
    pub user_info: Option<UserInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_info_from_backend_shape() {
        let info: UserInfo = serde_json::from_value(json!({
            "id": 7,
            "full_name": "Siti Rahma",
            "email": "siti@example.com",
            "photo_url": "/photos/7.png"
        }))
        .unwrap();
        assert_eq!(info.id, "7");
        assert_eq!(info.name, "Siti Rahma");
        assert_eq!(info.photo_url.as_deref(), Some("/photos/7.png"));
    }

    #[test]
    fn test_secrets_are_redacted_in_debug() {
        let token = AccessToken::new("secret-token");
        assert!(!format!("{:?}", token).contains("secret"));

        let creds = Credentials { email: "a@b.co".into(), password: "hunter22".into() };
        assert!(!format!("{:?}", creds).contains("hunter22"));
    }

    #[test]
    fn test_credentials_validation() {
        let bad = Credentials { email: "not-an-email".into(), password: String::new() };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }
}
