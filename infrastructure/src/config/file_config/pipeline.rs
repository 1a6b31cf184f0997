//! Pipeline configuration from TOML (`[pipeline]` section)

use serde::{Deserialize, Serialize};
use switchboard_application::PipelineConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    /// Maximum reject/redispatch cycles per run (default: 3)
    pub max_iterations: u32,
    /// Timeout for each gateway call in seconds (default: 90)
    pub step_timeout_secs: u64,
}

impl Default for FilePipelineConfig {
    fn default() -> Self {
        Self {
            max_iterations: 3,
            step_timeout_secs: 90,
        }
    }
}

impl FilePipelineConfig {
    /// Convert to the application-layer pipeline configuration.
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new(self.max_iterations, self.step_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_to_pipeline_config() {
        let file = FilePipelineConfig {
            max_iterations: 5,
            step_timeout_secs: 45,
        };
        let config = file.to_pipeline_config();
        assert_eq!(config.max_iterations, 5);
        assert_eq!(config.step_timeout, Duration::from_secs(45));
    }
}
