//! User preferences bundle synchronized with `/user/preferences`

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque per-user preferences. Older clients stored snake_case keys; they
/// are accepted on read and written back in camelCase. Absent sidebar
/// fields leave the current sidebar state alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Raw menu tree, converted by the menu store
    #[serde(default, alias = "menu_items", skip_serializing_if = "Option::is_none")]
    pub menu_items: Option<Value>,

    #[serde(default, alias = "active_item", skip_serializing_if = "Option::is_none")]
    pub active_item: Option<String>,

    #[serde(default, alias = "expanded_items", skip_serializing_if = "Option::is_none")]
    pub expanded_items: Option<Vec<String>>,

    #[serde(default, alias = "search_query", skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, alias = "sidebar_collapsed")]
    pub sidebar_collapsed: bool,
}

/// Presentation settings kept next to the menu state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiPreferences {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub sidebar_collapsed: bool,
}

impl UserPreferences {
    pub fn ui(&self) -> UiPreferences {
        UiPreferences {
            theme: self.theme.clone(),
            sidebar_collapsed: self.sidebar_collapsed,
        }
    }
}
