//! Agent registry port
//!
//! Defines the interface to the persistent agent registry.

use async_trait::async_trait;
use switchboard_domain::{Agent, AgentId, AgentUpdate};
use thiserror::Error;

/// Errors that can occur during registry operations
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Agent {0} not found")]
    NotFound(AgentId),

    #[error("{0}")]
    Validation(String),

    #[error("Registry storage error: {0}")]
    Storage(String),
}

/// Persistent registry of specialized agents
///
/// Reads may run concurrently; updates are serialized by the adapter so a
/// concurrent read always observes a complete record, old or new. Agents
/// are never deleted, so an id obtained from `list` stays resolvable.
#[async_trait]
pub trait AgentStore: Send + Sync {
    /// All registered agents in registry order
    async fn list(&self) -> Result<Vec<Agent>, RegistryError>;

    /// One agent by id
    async fn get(&self, id: &AgentId) -> Result<Agent, RegistryError>;

    /// Apply a partial update, persist it, and return the updated record
    async fn update(&self, id: &AgentId, update: AgentUpdate) -> Result<Agent, RegistryError>;
}
