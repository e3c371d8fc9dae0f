//! Application-wide constants

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Storage key of the persisted menu state blob
pub const MENU_STORAGE_KEY: &str = "menu_state";
pub const MENU_CACHE_TTL_MINUTES: i64 = 30;

/// Gateway sessions without a request for this long are dropped
pub const SESSION_IDLE_TIMEOUT_MINUTES: i64 = 60;
pub const SESSION_SWEEP_INTERVAL_SECONDS: u64 = 300;

pub const DASHBOARD_ROUTE: &str = "/dashboard";
pub const PROFILE_ROUTE: &str = "/profile";

pub const FALLBACK_MENU_ID: &str = "home";
pub const FALLBACK_MENU_TITLE: &str = "Dashboard";
pub const FALLBACK_MENU_ICON: &str = "home";
pub const DEFAULT_MENU_ICON: &str = "circle";

pub const MAX_PHOTO_BYTES: usize = 2 * 1024 * 1024;
pub const ALLOWED_PHOTO_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

