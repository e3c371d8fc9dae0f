// ============================================================================
// Portal Core - Menu Store
// File: crates/portal-core/src/services/menu_store.rs
// ============================================================================
//! Session-scoped menu tree with expansion, active item, and search state.
//!
//! The whole state bundle is persisted to the local store on every change
//! and restored on construction while it is younger than the cache window.
//! Server fetches are single-flight and stamped with a generation number;
//! a response whose generation was superseded is dropped.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::domain::cache_entry::within_window;
use crate::domain::menu_tree;
use crate::domain::raw_menu::convert_raw_menus;
use crate::domain::{AccessToken, MenuCacheEntry, MenuNode, UiPreferences, UserInfo, UserPreferences};
use crate::error::DomainError;
use crate::repositories::{LocalStore, MenuRepository};
use portal_shared::constants::{DASHBOARD_ROUTE, MENU_CACHE_TTL_MINUTES, MENU_STORAGE_KEY};

#[derive(Debug, Clone)]
pub struct MenuStoreSettings {
    pub storage_key: String,
    pub cache_ttl: Duration,
    pub dashboard_route: String,
}

impl Default for MenuStoreSettings {
    fn default() -> Self {
        Self {
            storage_key: MENU_STORAGE_KEY.to_string(),
            cache_ttl: Duration::minutes(MENU_CACHE_TTL_MINUTES),
            dashboard_route: DASHBOARD_ROUTE.to_string(),
        }
    }
}

impl MenuStoreSettings {
    /// Same settings with the storage key namespaced to one user.
    pub fn scoped_to(&self, user_id: &str) -> Self {
        Self {
            storage_key: format!("{}:{}", self.storage_key, user_id),
            ..self.clone()
        }
    }
}

/// Read-only view of the store state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSnapshot {
    pub menu_items: Vec<MenuNode>,
    pub filtered_menu_items: Vec<MenuNode>,
    pub expanded_items: BTreeSet<String>,
    pub active_item: Option<String>,
    pub search_query: String,
    pub loading: bool,
    pub error: Option<String>,
    pub user_info: Option<UserInfo>,
    pub last_sync: Option<DateTime<Utc>>,
}

impl MenuSnapshot {
    fn from_cache(entry: MenuCacheEntry) -> Self {
        let active_item = entry.active_item().map(str::to_string);
        let mut snapshot = Self {
            menu_items: entry.menu_items,
            expanded_items: entry.expanded_items.into_iter().collect(),
            active_item,
            search_query: entry.search_query,
            user_info: entry.user_info,
            last_sync: Some(entry.last_sync),
            ..Self::default()
        };
        snapshot.reconcile();
        snapshot
    }

    fn to_cache(&self) -> MenuCacheEntry {
        MenuCacheEntry {
            menu_items: self.menu_items.clone(),
            user_info: self.user_info.clone(),
            expanded_items: self.expanded_items.iter().cloned().collect(),
            active_item: self.active_item.clone().unwrap_or_default(),
            search_query: self.search_query.clone(),
            // never-synced state is written as epoch so it reads back as stale
            last_sync: self.last_sync.unwrap_or_default(),
        }
    }

    /// Drops references to nodes that are no longer in the tree and
    /// recomputes the filtered view.
    fn reconcile(&mut self) {
        let ids = menu_tree::collect_ids(&self.menu_items);
        if let Some(active) = self.active_item.as_deref() {
            if !ids.contains(active) {
                warn!("Active menu item {} no longer exists, clearing", active);
                self.active_item = None;
            }
        }
        self.expanded_items.retain(|id| ids.contains(id));
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered_menu_items = menu_tree::filter_nodes(&self.menu_items, &self.search_query);
    }
}

/// Result of one server load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoadOutcome {
    Loaded { items: usize },
    /// The fetch failed and the single "home" entry was installed
    Fallback { error: String },
    /// A newer load or a reset happened while this one was in flight
    Superseded,
}

pub struct MenuStore {
    repository: Arc<dyn MenuRepository>,
    storage: Arc<dyn LocalStore>,
    token: AccessToken,
    settings: MenuStoreSettings,
    state: RwLock<MenuSnapshot>,
    changes: watch::Sender<MenuSnapshot>,
    fetch_gate: Mutex<()>,
    generation: AtomicU64,
}

impl MenuStore {
    pub fn new(
        repository: Arc<dyn MenuRepository>,
        storage: Arc<dyn LocalStore>,
        token: AccessToken,
        settings: MenuStoreSettings,
    ) -> Self {
        let snapshot = Self::restore(storage.as_ref(), &settings);
        let (changes, _) = watch::channel(snapshot.clone());

        Self {
            repository,
            storage,
            token,
            settings,
            state: RwLock::new(snapshot),
            changes,
            fetch_gate: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    fn restore(storage: &dyn LocalStore, settings: &MenuStoreSettings) -> MenuSnapshot {
        let blob = match storage.get(&settings.storage_key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return MenuSnapshot::default(),
            Err(e) => {
                warn!("Failed to read menu cache: {}", e);
                return MenuSnapshot::default();
            }
        };

        let entry = match MenuCacheEntry::decode(&blob) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Discarding malformed menu cache: {}", e);
                Self::discard(storage, &settings.storage_key);
                return MenuSnapshot::default();
            }
        };

        if !entry.is_fresh(Utc::now(), settings.cache_ttl) {
            info!("Menu cache from {} expired, discarding", entry.last_sync);
            Self::discard(storage, &settings.storage_key);
            return MenuSnapshot::default();
        }

        debug!("Restored {} menu roots from cache", entry.menu_items.len());
        MenuSnapshot::from_cache(entry)
    }

    fn discard(storage: &dyn LocalStore, key: &str) {
        if let Err(e) = storage.remove(key) {
            warn!("Failed to remove menu cache: {}", e);
        }
    }

    fn persist(&self, snapshot: &MenuSnapshot) {
        let result = snapshot
            .to_cache()
            .encode()
            .and_then(|blob| self.storage.set(&self.settings.storage_key, &blob));
        if let Err(e) = result {
            warn!("Failed to persist menu state: {}", e);
        }
    }

    /// Applies `mutate` under the write lock, persists when asked, and
    /// publishes the new snapshot.
    fn commit<R>(&self, persist: bool, mutate: impl FnOnce(&mut MenuSnapshot) -> R) -> R {
        let mut state = self.state.write();
        let result = mutate(&mut state);
        if persist {
            self.persist(&state);
        }
        self.changes.send_replace(state.clone());
        result
    }

    /// Like `commit`, but only while `generation` is still the latest.
    fn commit_if_current<R>(
        &self,
        generation: u64,
        mutate: impl FnOnce(&mut MenuSnapshot) -> R,
    ) -> Option<R> {
        let mut state = self.state.write();
        if self.generation.load(Ordering::SeqCst) != generation {
            return None;
        }
        let result = mutate(&mut state);
        self.persist(&state);
        self.changes.send_replace(state.clone());
        Some(result)
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Fetches the menu tree from the server, falling back to a single
    /// dashboard entry on failure. Always overwrites the persisted cache.
    pub async fn load_user_menus(&self) -> LoadOutcome {
        let generation = self.next_generation();
        self.commit(false, |s| {
            s.loading = true;
            s.error = None;
        });

        let fetched = match self.repository.fetch_user_menus(&self.token).await {
            Ok(payload) => convert_raw_menus(&payload.menus).map(|items| (items, payload.user_info)),
            Err(e) => Err(e),
        };
        let now = Utc::now();

        let outcome = match fetched {
            Ok((items, user_info)) => {
                let count = menu_tree::count_nodes(&items);
                self.commit_if_current(generation, |s| {
                    s.menu_items = items;
                    if user_info.is_some() {
                        s.user_info = user_info;
                    }
                    s.last_sync = Some(now);
                    s.loading = false;
                    s.error = None;
                    s.reconcile();
                })
                .map(|_| {
                    info!("Loaded {} menu items", count);
                    LoadOutcome::Loaded { items: count }
                })
            }
            Err(e) => {
                let message = e.to_string();
                let fallback = vec![MenuNode::fallback(&self.settings.dashboard_route)];
                self.commit_if_current(generation, |s| {
                    s.menu_items = fallback;
                    s.last_sync = Some(now);
                    s.loading = false;
                    s.error = Some(message.clone());
                    s.reconcile();
                })
                .map(|_| {
                    warn!("Failed to load user menus, using fallback: {}", message);
                    LoadOutcome::Fallback { error: message }
                })
            }
        };

        outcome.unwrap_or_else(|| {
            debug!("Discarding superseded menu response (generation {})", generation);
            LoadOutcome::Superseded
        })
    }

    /// Loads from the server only when there is no cached tree or it is
    /// older than the cache window. Concurrent callers share one fetch.
    pub async fn ensure_menus_loaded(&self) -> Option<LoadOutcome> {
        let _gate = self.fetch_gate.lock().await;
        if self.is_cache_fresh() {
            debug!("Menu cache is fresh, skipping fetch");
            return None;
        }
        Some(self.load_user_menus().await)
    }

    pub fn is_cache_fresh(&self) -> bool {
        self.state
            .read()
            .last_sync
            .is_some_and(|last_sync| within_window(last_sync, Utc::now(), self.settings.cache_ttl))
    }

    /// Installs the state carried by a preferences bundle (login or
    /// explicit refresh). Returns whether a menu tree was installed; when it
    /// was not, the next `ensure_menus_loaded` fetches one.
    pub fn seed_from_preferences(&self, preferences: &UserPreferences, user_info: Option<UserInfo>) -> bool {
        let items = match preferences.menu_items.as_ref().map(convert_raw_menus) {
            Some(Ok(items)) if !items.is_empty() => Some(items),
            Some(Err(e)) => {
                warn!("Ignoring menu tree from preferences: {}", e);
                None
            }
            _ => None,
        };
        let seeded = items.is_some();
        let now = Utc::now();

        // a load started before the seed must not overwrite it
        self.next_generation();
        self.commit(true, |s| {
            if let Some(items) = items {
                s.menu_items = items;
                s.last_sync = Some(now);
                s.error = None;
            }
            if user_info.is_some() {
                s.user_info = user_info;
            }
            if let Some(expanded) = &preferences.expanded_items {
                s.expanded_items = expanded.iter().cloned().collect();
            }
            if let Some(active) = &preferences.active_item {
                s.active_item = Some(active.clone()).filter(|id| !id.is_empty());
            }
            if let Some(query) = &preferences.search_query {
                s.search_query = query.clone();
            }
            s.loading = false;
            s.reconcile();
        });
        seeded
    }

    /// Clears state and the persisted blob; in-flight loads are superseded.
    pub fn reset(&self) {
        let mut state = self.state.write();
        self.generation.fetch_add(1, Ordering::SeqCst);
        *state = MenuSnapshot::default();
        Self::discard(self.storage.as_ref(), &self.settings.storage_key);
        self.changes.send_replace(state.clone());
        debug!("Menu store reset");
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    pub fn find_item_by_route(&self, route: &str) -> Option<MenuNode> {
        menu_tree::find_by_route(&self.state.read().menu_items, route).cloned()
    }

    pub fn find_item_by_id(&self, id: &str) -> Option<MenuNode> {
        menu_tree::find_by_id(&self.state.read().menu_items, id).cloned()
    }

    /// Runs `f` against the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&MenuSnapshot) -> R) -> R {
        f(&self.state.read())
    }

    pub fn snapshot(&self) -> MenuSnapshot {
        self.state.read().clone()
    }

    pub fn menu_items(&self) -> Vec<MenuNode> {
        self.state.read().menu_items.clone()
    }

    pub fn filtered_menu_items(&self) -> Vec<MenuNode> {
        self.state.read().filtered_menu_items.clone()
    }

    pub fn expanded_items(&self) -> BTreeSet<String> {
        self.state.read().expanded_items.clone()
    }

    pub fn active_item(&self) -> Option<String> {
        self.state.read().active_item.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn user_info(&self) -> Option<UserInfo> {
        self.state.read().user_info.clone()
    }

    /// Receiver that observes every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<MenuSnapshot> {
        self.changes.subscribe()
    }

    pub fn settings(&self) -> &MenuStoreSettings {
        &self.settings
    }

    // ------------------------------------------------------------------
    // Mutations (each persists the whole bundle)
    // ------------------------------------------------------------------

    /// Returns the new expansion state of `id`.
    pub fn toggle_expanded(&self, id: &str) -> bool {
        self.commit(true, |s| {
            if s.expanded_items.remove(id) {
                false
            } else {
                s.expanded_items.insert(id.to_string());
                true
            }
        })
    }

    /// Marks every ancestor of `id` as expanded. Returns `false` when the
    /// id is not in the tree.
    pub fn expand_parents_of_item(&self, id: &str) -> bool {
        self.commit(true, |s| match menu_tree::ancestor_ids(&s.menu_items, id) {
            Some(ancestors) => {
                s.expanded_items.extend(ancestors);
                true
            }
            None => false,
        })
    }

    pub fn set_active_item(&self, id: &str) -> Result<(), DomainError> {
        if self.find_item_by_id(id).is_none() {
            return Err(DomainError::MenuItemNotFound(id.to_string()));
        }
        self.commit(true, |s| s.active_item = Some(id.to_string()));
        Ok(())
    }

    /// Selects the node that best covers a navigated path and expands its
    /// ancestors. A path outside the menu leaves state untouched.
    pub fn activate_route(&self, path: &str) -> Option<MenuNode> {
        let node = self.read(|s| menu_tree::best_match_for_path(&s.menu_items, path).cloned())?;
        self.commit(true, |s| {
            if let Some(ancestors) = menu_tree::ancestor_ids(&s.menu_items, &node.id) {
                s.expanded_items.extend(ancestors);
            }
            s.active_item = Some(node.id.clone());
        });
        Some(node)
    }

    pub fn set_search_query(&self, query: &str) {
        self.commit(true, |s| {
            s.search_query = query.to_string();
            s.refilter();
        });
    }

    pub fn clear_search(&self) {
        self.set_search_query("");
    }

    /// Menu part of the preferences bundle, merged with UI settings.
    pub fn preferences(&self, ui: &UiPreferences) -> UserPreferences {
        let state = self.state.read();
        let menu_items = match serde_json::to_value(&state.menu_items) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Failed to serialize menu tree for preferences: {}", e);
                None
            }
        };

        UserPreferences {
            menu_items,
            active_item: state.active_item.clone(),
            expanded_items: Some(state.expanded_items.iter().cloned().collect()),
            search_query: Some(state.search_query.clone()),
            theme: ui.theme.clone(),
            sidebar_collapsed: ui.sidebar_collapsed,
        }
    }
}
