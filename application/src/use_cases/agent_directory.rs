//! Agent directory use case
//!
//! Browse and edit operations over the agent registry. Listing projects
//! summaries (prompts withheld); fetching one agent includes the prompt so
//! it can be edited and resubmitted.

use crate::ports::agent_store::{AgentStore, RegistryError};
use std::sync::Arc;
use switchboard_domain::{Agent, AgentId, AgentSummary, AgentUpdate};
use tracing::info;

/// Application service for the agent registry
pub struct AgentDirectory {
    store: Arc<dyn AgentStore>,
}

impl AgentDirectory {
    pub fn new(store: Arc<dyn AgentStore>) -> Self {
        Self { store }
    }

    /// Ordered summaries of all registered agents
    pub async fn list_agents(&self) -> Result<Vec<AgentSummary>, RegistryError> {
        let agents = self.store.list().await?;
        Ok(agents.iter().map(Agent::summary).collect())
    }

    /// One agent including its prompt
    pub async fn get_agent(&self, id: &AgentId) -> Result<Agent, RegistryError> {
        self.store.get(id).await
    }

    /// Apply a partial update and return the refreshed summary
    pub async fn update_agent(
        &self,
        id: &AgentId,
        update: AgentUpdate,
    ) -> Result<AgentSummary, RegistryError> {
        let agent = self.store.update(id, update).await?;
        info!("Agent {} updated", agent.id);
        Ok(agent.summary())
    }
}
