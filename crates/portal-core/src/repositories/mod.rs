//! Repository traits (ports)

pub mod auth_repository;
pub mod menu_repository;
pub mod user_repository;
pub mod local_store;

pub use auth_repository::AuthRepository;
pub use menu_repository::MenuRepository;
pub use user_repository::UserRepository;
pub use local_store::LocalStore;

#[cfg(test)]
pub use auth_repository::MockAuthRepository;
#[cfg(test)]
pub use menu_repository::MockMenuRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
