//! Domain services (client-tier logic)

pub mod menu_store;
pub mod access_resolver;
pub mod session;
pub mod auth_service;
pub mod user_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use menu_store::{LoadOutcome, MenuSnapshot, MenuStore, MenuStoreSettings};
pub use access_resolver::{AccessDecision, AccessPolicy, AccessResolver, DenialReason, GrantBasis};
pub use session::Session;
pub use auth_service::AuthService;
pub use user_service::UserService;
