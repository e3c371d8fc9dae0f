//! # Portal Core
//! 
//! Domain entities, services, and repository traits for the admin portal:
//! the menu store, the route access resolver, and the session lifecycle.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
