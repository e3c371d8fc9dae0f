//! # Portal Core - Domain Module
//! 
//! Domain entities for the admin portal.

pub mod ids;
pub mod menu_node;
pub mod menu_tree;
pub mod raw_menu;
pub mod cache_entry;
pub mod preferences;
pub mod account;
pub mod user_record;

// Re-export all entities
pub use menu_node::{MenuNode, RouteMatch};
pub use cache_entry::MenuCacheEntry;
pub use preferences::{UiPreferences, UserPreferences};
pub use account::{AccessToken, Credentials, LoginResult, MenuPayload, UserInfo};
pub use user_record::{NewUser, PhotoUpload, UserQuery, UserRecord, UserUpdate};
