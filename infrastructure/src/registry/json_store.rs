//! JSON file agent store
//!
//! Keeps the registry in memory behind a `RwLock` and mirrors every change
//! to a JSON file (an object keyed by agent id) so edits survive restarts.
//! Reads are served from memory; an update rewrites the whole file before
//! the new record becomes visible.

use crate::registry::seed;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use switchboard_application::{AgentStore, RegistryError};
use switchboard_domain::{Agent, AgentId, AgentUpdate};
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug)]
pub struct JsonAgentStore {
    path: PathBuf,
    agents: RwLock<Vec<Agent>>,
}

impl JsonAgentStore {
    /// Opens the registry at `path`, loading existing records or seeding the
    /// default agent set when the file does not exist.
    ///
    /// A file that exists but cannot be read or parsed is an error: the
    /// registry refuses to silently replace records that may only be
    /// damaged.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref().to_path_buf();

        let agents = if path.exists() {
            let raw = std::fs::read_to_string(&path).map_err(|e| {
                RegistryError::Storage(format!("could not read {}: {e}", path.display()))
            })?;
            let records: BTreeMap<String, Agent> = serde_json::from_str(&raw).map_err(|e| {
                RegistryError::Storage(format!("could not parse {}: {e}", path.display()))
            })?;
            let agents: Vec<Agent> = records.into_values().collect();
            info!("Loaded {} agents from {}", agents.len(), path.display());
            agents
        } else {
            let agents = seed::default_agents(&now_timestamp());
            write_records(&path, &agents)?;
            info!(
                "Seeded {} default agents into {}",
                agents.len(),
                path.display()
            );
            agents
        };

        Ok(Self {
            path,
            agents: RwLock::new(agents),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AgentStore for JsonAgentStore {
    async fn list(&self) -> Result<Vec<Agent>, RegistryError> {
        Ok(self.agents.read().await.clone())
    }

    async fn get(&self, id: &AgentId) -> Result<Agent, RegistryError> {
        self.agents
            .read()
            .await
            .iter()
            .find(|agent| &agent.id == id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.clone()))
    }

    async fn update(&self, id: &AgentId, update: AgentUpdate) -> Result<Agent, RegistryError> {
        let mut agents = self.agents.write().await;

        let Some(position) = agents.iter().position(|agent| &agent.id == id) else {
            return Err(RegistryError::NotFound(id.clone()));
        };

        let mut updated = agents[position].clone();
        updated
            .apply_update(update, now_timestamp())
            .map_err(|e| RegistryError::Validation(e.to_string()))?;

        // Persist first; memory only changes once the file write succeeded
        let mut next = agents.clone();
        next[position] = updated.clone();
        write_records(&self.path, &next)?;

        *agents = next;
        debug!("Agent {id} updated and persisted");
        Ok(updated)
    }
}

fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn write_records(path: &Path, agents: &[Agent]) -> Result<(), RegistryError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            RegistryError::Storage(format!("could not create {}: {e}", parent.display()))
        })?;
    }

    let records: BTreeMap<&str, &Agent> = agents
        .iter()
        .map(|agent| (agent.id.as_str(), agent))
        .collect();
    let json = serde_json::to_string_pretty(&records)
        .map_err(|e| RegistryError::Storage(format!("could not serialize registry: {e}")))?;
    std::fs::write(path, json)
        .map_err(|e| RegistryError::Storage(format!("could not write {}: {e}", path.display())))?;
    Ok(())
}
