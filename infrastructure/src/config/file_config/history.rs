//! Run history configuration from TOML (`[history]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHistoryConfig {
    /// JSONL file the completed runs are appended to (default: "runs.jsonl")
    pub path: PathBuf,
}

impl Default for FileHistoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("runs.jsonl"),
        }
    }
}
