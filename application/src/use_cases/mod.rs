//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod agent_directory;
pub mod process_query;
