// ============================================================================
// Portal Core - Menu Node Entity
// File: crates/portal-core/src/domain/menu_node.rs
// Description: Navigation menu node (owned tree)
// ============================================================================

use serde::{Deserialize, Serialize};

use portal_shared::constants::{
    DEFAULT_MENU_ICON, FALLBACK_MENU_ICON, FALLBACK_MENU_ID, FALLBACK_MENU_TITLE,
};

/// One navigable section of the menu forest.
///
/// Each node owns its children; parent lookups are done by walking from the
/// roots, never through stored back-references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    pub id: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default = "default_icon")]
    pub icon: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
}

fn default_icon() -> String {
    DEFAULT_MENU_ICON.to_string()
}

/// How a navigation target relates to a node's route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteMatch {
    Exact,
    Descendant,
}

impl MenuNode {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            icon: default_icon(),
            route: None,
            children: Vec::new(),
        }
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_children(mut self, children: Vec<MenuNode>) -> Self {
        self.children = children;
        self
    }

    /// Single "home" entry shown when the menu cannot be fetched
    pub fn fallback(dashboard_route: &str) -> Self {
        Self::new(FALLBACK_MENU_ID, FALLBACK_MENU_TITLE)
            .with_icon(FALLBACK_MENU_ICON)
            .with_route(dashboard_route)
    }

    /// `needle` must already be lowercased.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }

    /// Exact route, or a strict path below it (`route + "/" + suffix`).
    pub fn route_match(&self, path: &str) -> Option<RouteMatch> {
        let route = self.route.as_deref().filter(|r| !r.is_empty())?;
        if path == route {
            return Some(RouteMatch::Exact);
        }
        path.strip_prefix(route)
            .filter(|rest| rest.starts_with('/'))
            .map(|_| RouteMatch::Descendant)
    }
}
