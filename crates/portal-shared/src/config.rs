//! Configuration management

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DASHBOARD_ROUTE, MENU_CACHE_TTL_MINUTES, MENU_STORAGE_KEY, PROFILE_ROUTE,
    SESSION_IDLE_TIMEOUT_MINUTES, SESSION_SWEEP_INTERVAL_SECONDS,
};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub backend: BackendSettings,
    pub menu: MenuSettings,
    pub session: SessionSettings,
    pub storage: StorageSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Origin of the browser front-end allowed by CORS
    pub frontend_origin: String,
}

/// REST backend the portal talks to
#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MenuSettings {
    pub storage_key: String,
    pub cache_ttl_minutes: i64,
    pub dashboard_route: String,
    /// Routes exempt from menu-based access checks
    pub allow_list: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub idle_timeout_minutes: i64,
    pub sweep_interval_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub json: bool,
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Layering: defaults, `<dir>/default`, `<dir>/<APP_ENV>`, then `PORTAL__*` variables.
    pub fn load_from(config_dir: &Path) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let default_file = config_dir.join("default");
        let env_file = config_dir.join(&env);

        let config = Config::builder()
            .set_default("app.env", env.as_str())?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "portal-server")?
            .set_default("app.frontend_origin", "http://localhost:4200")?
            .set_default("backend.base_url", "http://localhost:3000/api")?
            .set_default("backend.timeout_seconds", 15)?
            .set_default("menu.storage_key", MENU_STORAGE_KEY)?
            .set_default("menu.cache_ttl_minutes", MENU_CACHE_TTL_MINUTES)?
            .set_default("menu.dashboard_route", DASHBOARD_ROUTE)?
            .set_default("menu.allow_list", vec![DASHBOARD_ROUTE, PROFILE_ROUTE])?
            .set_default("session.idle_timeout_minutes", SESSION_IDLE_TIMEOUT_MINUTES)?
            .set_default("session.sweep_interval_seconds", SESSION_SWEEP_INTERVAL_SECONDS)?
            .set_default("storage.path", "data/local_store.json")?
            .add_source(File::with_name(&default_file.to_string_lossy()).required(false))
            .add_source(File::with_name(&env_file.to_string_lossy()).required(false))
            .add_source(Environment::with_prefix("PORTAL").separator("__").try_parsing(true))
            .build()?;
        config.try_deserialize()
    }
}
