use std::sync::Arc;

use portal_core::services::{AuthService, UserService};
use portal_shared::config::AppConfig;

use crate::sessions::SessionRegistry;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(config: AppConfig, auth: AuthService, users: UserService) -> Self {
        let idle_timeout = chrono::Duration::minutes(config.session.idle_timeout_minutes);
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            users: Arc::new(users),
            sessions: Arc::new(SessionRegistry::new(idle_timeout)),
        }
    }
}
