//! # Portal API
//! 
//! HTTP gateway: handlers, session middleware, and the response envelope.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod sessions;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use sessions::SessionRegistry;
pub use state::AppState;
