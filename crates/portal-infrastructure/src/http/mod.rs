//! REST backend adapters

pub mod client;
pub mod auth_repo_impl;
pub mod menu_repo_impl;
pub mod user_repo_impl;

pub use client::BackendClient;
pub use auth_repo_impl::HttpAuthRepository;
pub use menu_repo_impl::HttpMenuRepository;
pub use user_repo_impl::HttpUserRepository;
