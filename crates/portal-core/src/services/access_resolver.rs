// ============================================================================
// Portal Core - Access Resolver
// File: crates/portal-core/src/services/access_resolver.rs
// ============================================================================
//! Route guard: decides whether a navigation target is reachable through
//! the user's menu.
//!
//! This is advisory. It keeps forbidden views from rendering; the backend
//! still authorizes every API call on its own.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::menu_store::MenuStore;
use crate::domain::{menu_tree, RouteMatch};
use crate::error::DomainError;
use portal_shared::constants::{DASHBOARD_ROUTE, PROFILE_ROUTE};
use portal_shared::utils::route_path;

#[derive(Debug, Clone)]
pub struct AccessPolicy {
    /// Always permitted once authenticated
    pub allow_list: Vec<String>,
    /// Where denied navigations are sent
    pub redirect_route: String,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            allow_list: vec![DASHBOARD_ROUTE.to_string(), PROFILE_ROUTE.to_string()],
            redirect_route: DASHBOARD_ROUTE.to_string(),
        }
    }
}

impl AccessPolicy {
    pub fn allows(&self, path: &str) -> bool {
        self.allow_list.iter().any(|route| route == path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantBasis {
    AllowList,
    ExactRoute,
    DescendantRoute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    EmptyMenu,
    MalformedMenu,
    NotInMenu,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
    Granted { path: String, basis: GrantBasis },
    Denied { redirect_to: String, reason: DenialReason },
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted { .. })
    }

    pub fn redirect_to(&self) -> Option<&str> {
        match self {
            AccessDecision::Granted { .. } => None,
            AccessDecision::Denied { redirect_to, .. } => Some(redirect_to),
        }
    }
}

pub struct AccessResolver {
    store: Arc<MenuStore>,
    policy: AccessPolicy,
}

impl AccessResolver {
    pub fn new(store: Arc<MenuStore>, policy: AccessPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// Guard entry point. Never fails: errors become a denial with the
    /// dashboard redirect.
    pub async fn can_activate(&self, target_url: &str) -> AccessDecision {
        match self.resolve(target_url).await {
            Ok(decision) => decision,
            Err(e) => {
                error!("Access check for {} failed: {}", target_url, e);
                self.deny(DenialReason::Error)
            }
        }
    }

    async fn resolve(&self, target_url: &str) -> Result<AccessDecision, DomainError> {
        let path = route_path(target_url)
            .ok_or_else(|| DomainError::InvalidRoute(target_url.to_string()))?;

        if self.policy.allows(path) {
            debug!("{} is allow-listed", path);
            return Ok(self.grant(path, GrantBasis::AllowList));
        }

        // may hit the network
        self.store.ensure_menus_loaded().await;

        let decision = self.store.read(|state| {
            let items = &state.menu_items;
            if items.is_empty() {
                warn!("Denying {}: menu is empty", path);
                return self.deny(DenialReason::EmptyMenu);
            }
            if let Err(e) = menu_tree::check_well_formed(items) {
                warn!("Denying {}: {}", path, e);
                return self.deny(DenialReason::MalformedMenu);
            }
            if let Some(id) = menu_tree::first_duplicate_id(items) {
                warn!("Menu repeats id {}; id lookups use the first node", id);
            }
            match menu_tree::authorize_route(items, path) {
                Some(RouteMatch::Exact) => self.grant(path, GrantBasis::ExactRoute),
                Some(RouteMatch::Descendant) => self.grant(path, GrantBasis::DescendantRoute),
                None => {
                    info!("Denying {}: not in menu", path);
                    self.deny(DenialReason::NotInMenu)
                }
            }
        });
        Ok(decision)
    }

    fn grant(&self, path: &str, basis: GrantBasis) -> AccessDecision {
        AccessDecision::Granted { path: path.to_string(), basis }
    }

    fn deny(&self, reason: DenialReason) -> AccessDecision {
        AccessDecision::Denied {
            redirect_to: self.policy.redirect_route.clone(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MenuCacheEntry, MenuNode, MenuPayload};
    use crate::repositories::MockMenuRepository;
    use crate::services::menu_store::MenuStoreSettings;
    use crate::services::test_support::{token, InMemoryStore};
    use chrono::Utc;
    use serde_json::json;

    fn scenario_payload() -> MenuPayload {
        MenuPayload {
            menus: json!([
                { "id": "1", "title": "Home", "route": "/dashboard" },
                { "id": "2", "title": "Users", "route": "/configuration/users" }
            ]),
            user_info: None,
        }
    }

    fn resolver(repo: MockMenuRepository) -> (AccessResolver, Arc<MenuStore>) {
        let store = Arc::new(MenuStore::new(
            Arc::new(repo),
            Arc::new(InMemoryStore::default()),
            token(),
            MenuStoreSettings::default(),
        ));
        (AccessResolver::new(store.clone(), AccessPolicy::default()), store)
    }

    fn scenario_repo(times: usize) -> MockMenuRepository {
        let mut repo = MockMenuRepository::new();
        repo.expect_fetch_user_menus().times(times).returning(|_| Ok(scenario_payload()));
        repo
    }

    #[tokio::test]
    async fn test_scenario_lookup_and_guard() {
        let (resolver, store) = resolver(scenario_repo(1));

        let users = resolver.can_activate("/configuration/users").await;
        assert_eq!(
            users,
            AccessDecision::Granted { path: "/configuration/users".into(), basis: GrantBasis::ExactRoute }
        );
        assert_eq!(store.find_item_by_route("/configuration/users").unwrap().id, "2");

        let nested = resolver.can_activate("/configuration/users/5").await;
        assert_eq!(
            nested,
            AccessDecision::Granted { path: "/configuration/users/5".into(), basis: GrantBasis::DescendantRoute }
        );

        let reports = resolver.can_activate("/reports").await;
        assert!(!reports.is_granted());
        assert_eq!(reports.redirect_to(), Some("/dashboard"));
    }

    #[tokio::test]
    async fn test_allow_list_skips_menu_entirely() {
        let (resolver, store) = resolver(scenario_repo(0));

        for target in ["/dashboard", "/profile", "/dashboard?tab=stats"] {
            let decision = resolver.can_activate(target).await;
            assert!(matches!(decision, AccessDecision::Granted { basis: GrantBasis::AllowList, .. }));
        }
        assert!(store.menu_items().is_empty());
    }

    #[tokio::test]
    async fn test_sibling_prefix_is_not_a_descendant() {
        let (resolver, _) = resolver(scenario_repo(1));
        let decision = resolver.can_activate("/configuration/users-export").await;
        assert_eq!(
            decision,
            AccessDecision::Denied { redirect_to: "/dashboard".into(), reason: DenialReason::NotInMenu }
        );
    }

    #[tokio::test]
    async fn test_empty_menu_denies() {
        let mut repo = MockMenuRepository::new();
        repo.expect_fetch_user_menus()
            .times(1)
            .returning(|_| Ok(MenuPayload { menus: json!([]), user_info: None }));
        let (resolver, _) = resolver(repo);

        let decision = resolver.can_activate("/configuration/users").await;
        assert_eq!(decision.redirect_to(), Some("/dashboard"));
        assert!(matches!(decision, AccessDecision::Denied { reason: DenialReason::EmptyMenu, .. }));
    }

    #[tokio::test]
    async fn test_malformed_cached_menu_denies() {
        let blob = MenuCacheEntry {
            menu_items: vec![MenuNode::new("", "Nameless").with_route("/configuration/users")],
            user_info: None,
            expanded_items: vec![],
            active_item: String::new(),
            search_query: String::new(),
            last_sync: Utc::now(),
        }
        .encode()
        .unwrap();
        let store = Arc::new(MenuStore::new(
            Arc::new(scenario_repo(0)),
            Arc::new(InMemoryStore::with_entry("menu_state", &blob)),
            token(),
            MenuStoreSettings::default(),
        ));
        let resolver = AccessResolver::new(store, AccessPolicy::default());

        let decision = resolver.can_activate("/configuration/users").await;
        assert!(matches!(decision, AccessDecision::Denied { reason: DenialReason::MalformedMenu, .. }));
    }

    #[tokio::test]
    async fn test_repeated_ids_still_grant_listed_routes() {
        let mut repo = MockMenuRepository::new();
        repo.expect_fetch_user_menus().times(1).returning(|_| {
            Ok(MenuPayload {
                menus: json!([
                    { "id": 1, "name": "Users", "link": "/configuration/users" },
                    { "id": 1, "name": "Roles", "link": "/configuration/roles" }
                ]),
                user_info: None,
            })
        });
        let (resolver, _) = resolver(repo);

        for target in ["/configuration/users", "/configuration/roles"] {
            assert_eq!(
                resolver.can_activate(target).await,
                AccessDecision::Granted { path: target.into(), basis: GrantBasis::ExactRoute }
            );
        }
    }

    #[tokio::test]
    async fn test_trailing_slash_route_matches() {
        let mut repo = MockMenuRepository::new();
        repo.expect_fetch_user_menus().times(1).returning(|_| {
            Ok(MenuPayload {
                menus: json!([{ "id": 7, "name": "Reports", "link": "/reports/" }]),
                user_info: None,
            })
        });
        let (resolver, _) = resolver(repo);

        for target in ["/reports/", "/reports", "/reports/2026"] {
            assert!(resolver.can_activate(target).await.is_granted(), "{} should be granted", target);
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_only_allows_dashboard() {
        let mut repo = MockMenuRepository::new();
        repo.expect_fetch_user_menus()
            .times(1)
            .returning(|_| Err(DomainError::BackendError("connection refused".into())));
        let (resolver, _) = resolver(repo);

        assert!(!resolver.can_activate("/configuration/users").await.is_granted());
        assert!(resolver.can_activate("/dashboard").await.is_granted());
    }

    #[tokio::test]
    async fn test_invalid_target_is_denied() {
        let (resolver, _) = resolver(scenario_repo(0));
        let decision = resolver.can_activate("configuration/users").await;
        assert_eq!(
            decision,
            AccessDecision::Denied { redirect_to: "/dashboard".into(), reason: DenialReason::Error }
        );
    }

    #[tokio::test]
    async fn test_repeated_checks_fetch_once() {
        let (resolver, _) = resolver(scenario_repo(1));
        for _ in 0..3 {
            assert!(resolver.can_activate("/configuration/users/5").await.is_granted());
        }
    }

    #[test]
    fn test_decision_serialization() {
        let denied = AccessDecision::Denied { redirect_to: "/dashboard".into(), reason: DenialReason::NotInMenu };
        assert_eq!(
            serde_json::to_value(&denied).unwrap(),
            json!({ "decision": "denied", "redirect_to": "/dashboard", "reason": "not_in_menu" })
        );
    }
}
