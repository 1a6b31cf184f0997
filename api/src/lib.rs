//! API layer for switchboard
//!
//! This crate contains the HTTP surface: route handlers, the shared handler
//! state, and the error-to-status mapping. Handlers translate between the
//! wire and the application layer and hold no pipeline logic of their own.

pub mod error;
pub mod routes;
pub mod state;

// Re-export commonly used types
pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
