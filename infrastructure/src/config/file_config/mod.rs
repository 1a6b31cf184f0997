//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; defaults apply per missing field.

mod history;
mod llm;
mod pipeline;
mod registry;
mod server;

pub use history::FileHistoryConfig;
pub use llm::FileLlmConfig;
pub use pipeline::FilePipelineConfig;
pub use registry::FileRegistryConfig;
pub use server::FileServerConfig;

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP server bind settings
    pub server: FileServerConfig,
    /// LLM gateway settings
    pub llm: FileLlmConfig,
    /// Iteration bound and per-step timeout
    pub pipeline: FilePipelineConfig,
    /// Agent registry file location
    pub registry: FileRegistryConfig,
    /// Run history file location
    pub history: FileHistoryConfig,
}

impl FileConfig {
    /// Validate the merged configuration, returning all detected issues.
    ///
    /// Issues are warnings, not hard failures: a missing API key still
    /// leaves the registry and health endpoints usable, so the caller
    /// decides whether to proceed.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.pipeline.max_iterations == 0 {
            issues.push(
                "pipeline.max_iterations is 0; the first rejection will end the run".to_string(),
            );
        }
        if self.pipeline.step_timeout_secs == 0 {
            issues.push(
                "pipeline.step_timeout_secs is 0; every gateway call will time out".to_string(),
            );
        }
        if self.llm.api_key.is_none() {
            issues.push(
                "llm.api_key is not set (OPENROUTER_API_KEY); completions will be rejected upstream"
                    .to_string(),
            );
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            issues.push(format!(
                "llm.temperature {} is outside the supported 0.0..=2.0 range",
                self.llm.temperature
            ));
        }
        if self.registry.path.as_os_str().is_empty() {
            issues.push("registry.path is empty".to_string());
        }
        if self.history.path.as_os_str().is_empty() {
            issues.push("history.path is empty".to_string());
        }

        issues
    }
}
