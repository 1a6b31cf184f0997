//! Configuration loading for switchboard
//!
//! This module handles file I/O and merging of configuration from multiple
//! sources. The priority order (highest to lowest):
//!
//! 1. Environment: `SWITCHBOARD_` prefixed variables (`__` separates
//!    sections, e.g. `SWITCHBOARD_SERVER__PORT`), plus `OPENROUTER_API_KEY`
//!    and `MODEL_NAME` as direct fallbacks for the `[llm]` section
//! 2. `--config <path>` specified file
//! 3. Working directory: `./switchboard.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileHistoryConfig, FileLlmConfig, FilePipelineConfig, FileRegistryConfig,
    FileServerConfig,
};
pub use loader::ConfigLoader;
