//! Local key-value store trait (port)
//!
//! Reads and writes are synchronous; concurrent writers follow last-writer-wins.

use crate::error::DomainError;

pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
    fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;
    fn remove(&self, key: &str) -> Result<(), DomainError>;
}
