// ============================================================================
// Portal Core - Session
// File: crates/portal-core/src/services/session.rs
// ============================================================================
//! One authenticated user's client context.
//!
//! A session is created at login and torn down at logout. It owns the menu
//! store (scoped to the user) and the route guard that reads it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::access_resolver::{AccessDecision, AccessPolicy, AccessResolver};
use super::menu_store::{MenuStore, MenuStoreSettings};
use crate::domain::{AccessToken, LoginResult, MenuNode, UiPreferences, UserInfo, UserPreferences};
use crate::error::DomainError;
use crate::repositories::{LocalStore, MenuRepository};

pub struct Session {
    id: Uuid,
    user: UserInfo,
    token: AccessToken,
    menu: Arc<MenuStore>,
    access: AccessResolver,
    menu_repository: Arc<dyn MenuRepository>,
    ui: RwLock<UiPreferences>,
    started_at: DateTime<Utc>,
    last_seen: RwLock<DateTime<Utc>>,
}

impl Session {
    /// Builds the context for a fresh login and seeds the menu store from
    /// the preferences bundle returned with it.
    pub fn start(
        login: LoginResult,
        menu_repository: Arc<dyn MenuRepository>,
        storage: Arc<dyn LocalStore>,
        settings: &MenuStoreSettings,
        policy: AccessPolicy,
    ) -> Self {
        let LoginResult { token, user, preferences } = login;

        let menu = Arc::new(MenuStore::new(
            menu_repository.clone(),
            storage,
            token.clone(),
            settings.scoped_to(&user.id),
        ));
        let seeded = menu.seed_from_preferences(&preferences, Some(user.clone()));
        debug!("Session for user {} started (menu seeded: {})", user.id, seeded);

        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            access: AccessResolver::new(menu.clone(), policy),
            ui: RwLock::new(preferences.ui()),
            user,
            token,
            menu,
            menu_repository,
            started_at: now,
            last_seen: RwLock::new(now),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user(&self) -> &UserInfo {
        &self.user
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    pub fn menu(&self) -> &Arc<MenuStore> {
        &self.menu
    }

    pub fn access(&self) -> &AccessResolver {
        &self.access
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn last_seen(&self) -> DateTime<Utc> {
        *self.last_seen.read()
    }

    /// Records activity; idle time is measured from the latest touch.
    pub fn touch(&self, now: DateTime<Utc>) {
        let mut last_seen = self.last_seen.write();
        if now > *last_seen {
            *last_seen = now;
        }
    }

    pub fn is_idle(&self, now: DateTime<Utc>, idle_timeout: chrono::Duration) -> bool {
        now - self.last_seen() >= idle_timeout
    }

    /// Guard check followed by selecting the menu node the target belongs to.
    pub async fn navigate(&self, url: &str) -> (AccessDecision, Option<MenuNode>) {
        let decision = self.access.can_activate(url).await;
        let node = match &decision {
            AccessDecision::Granted { path, .. } => self.menu.activate_route(path),
            AccessDecision::Denied { redirect_to, reason } => {
                info!("Navigation to {} denied ({:?}), redirecting to {}", url, reason, redirect_to);
                None
            }
        };
        (decision, node)
    }

    pub fn ui_preferences(&self) -> UiPreferences {
        self.ui.read().clone()
    }

    pub fn update_ui(&self, ui: UiPreferences) {
        *self.ui.write() = ui;
    }

    /// Current bundle: menu state merged with UI settings
    pub fn preferences(&self) -> UserPreferences {
        self.menu.preferences(&self.ui.read())
    }

    pub async fn save_preferences(&self) -> Result<UserPreferences, DomainError> {
        let preferences = self.preferences();
        self.menu_repository.save_preferences(&self.token, &preferences).await?;
        debug!("Saved preferences for user {}", self.user.id);
        Ok(preferences)
    }

    /// Pulls the bundle from the backend and installs it. A bundle without
    /// a menu tree keeps the current one.
    pub async fn refresh_preferences(&self) -> Result<UserPreferences, DomainError> {
        let preferences = self.menu_repository.fetch_preferences(&self.token).await?;
        if !self.menu.seed_from_preferences(&preferences, None) {
            warn!("Preferences for user {} carry no menu tree", self.user.id);
        }
        *self.ui.write() = preferences.ui();
        Ok(self.preferences())
    }

    /// Drops all client state for this user
    pub fn end(&self) {
        self.menu.reset();
        info!("Session {} for user {} ended", self.id, self.user.id);
    }
}
