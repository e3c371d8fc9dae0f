//! Fixtures shared by the service tests

use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::domain::{AccessToken, MenuPayload, UserInfo};
use crate::error::DomainError;
use crate::repositories::LocalStore;

#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.entries.lock().insert(key.to_string(), value.to_string());
        store
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    pub fn json(&self, key: &str) -> Option<Value> {
        self.raw(key).and_then(|blob| serde_json::from_str(&blob).ok())
    }
}

impl LocalStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

pub fn token() -> AccessToken {
    AccessToken::new("test-token")
}

pub fn user() -> UserInfo {
    UserInfo {
        id: "7".into(),
        name: "Siti Rahma".into(),
        username: Some("srahma".into()),
        email: Some("siti@example.com".into()),
        role: Some("admin".into()),
        photo_url: None,
    }
}

/// Server-shaped tree: Home, Users, and a nested Reports group
pub fn raw_menus() -> Value {
    json!([
        { "id": 1, "name": "Home", "icon": "home", "link": "/dashboard" },
        { "id": 2, "name": "Users", "icon": "people", "link": "/configuration/users",
          "description": "Manage user accounts" },
        { "id": 30, "name": "Reports", "icon": "chart", "children": [
            { "id": 31, "name": "Sales", "link": "/reports/sales", "children": [
                { "id": 32, "name": "Monthly", "link": "/reports/sales/monthly" }
            ]}
        ]}
    ])
}

pub fn menu_payload() -> MenuPayload {
    MenuPayload { menus: raw_menus(), user_info: Some(user()) }
}
