// ============================================================================
// Portal Core - Menu Cache Entry
// File: crates/portal-core/src/domain/cache_entry.rs
// Description: Persisted menu state blob with its sync timestamp
// ============================================================================

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::account::UserInfo;
use super::menu_node::MenuNode;
use crate::error::DomainError;

/// Serialized menu state, stored as one JSON blob under a fixed key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCacheEntry {
    pub menu_items: Vec<MenuNode>,
    #[serde(default)]
    pub user_info: Option<UserInfo>,
    #[serde(default)]
    pub expanded_items: Vec<String>,
    #[serde(default)]
    pub active_item: String,
    #[serde(default)]
    pub search_query: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_sync: DateTime<Utc>,
}

impl MenuCacheEntry {
    pub fn decode(blob: &str) -> Result<Self, DomainError> {
        Ok(serde_json::from_str(blob)?)
    }

    pub fn encode(&self) -> Result<String, DomainError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Fresh while `0 <= now - last_sync <= ttl`. A timestamp in the future
    /// cannot be trusted and counts as stale.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        within_window(self.last_sync, now, ttl)
    }

    pub fn active_item(&self) -> Option<&str> {
        Some(self.active_item.as_str()).filter(|id| !id.is_empty())
    }
}

pub fn within_window(last_sync: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    let age = now.signed_duration_since(last_sync);
    age >= Duration::zero() && age <= ttl
}
