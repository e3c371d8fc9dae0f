//! # Portal Infrastructure
//! 
//! Backend HTTP adapters and local key-value stores.

pub mod http;
pub mod storage;

pub use http::{BackendClient, HttpAuthRepository, HttpMenuRepository, HttpUserRepository};
pub use storage::{FileStore, MemoryStore};
