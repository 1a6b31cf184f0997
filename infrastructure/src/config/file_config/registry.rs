//! Agent registry configuration from TOML (`[registry]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRegistryConfig {
    /// JSON file holding the agent records (default: "agents.json")
    pub path: PathBuf,
}

impl Default for FileRegistryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("agents.json"),
        }
    }
}
