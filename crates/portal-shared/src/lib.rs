//! # Portal Shared
//! 
//! Shared utilities, types, configuration, and telemetry for the admin portal.

pub mod constants;
pub mod types;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
