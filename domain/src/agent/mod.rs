//! Agent domain module
//!
//! Contains the specialized-agent record, its summary projection,
//! and the partial-update payload used by the registry.

pub mod entities;
pub mod value_objects;

pub use entities::{Agent, AgentSummary, AgentUpdate};
pub use value_objects::AgentId;
