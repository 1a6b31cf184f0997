//! Infrastructure layer for switchboard
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod history;
pub mod llm;
pub mod registry;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileHistoryConfig, FileLlmConfig, FilePipelineConfig,
    FileRegistryConfig, FileServerConfig,
};
pub use history::JsonlRunStore;
pub use llm::OpenRouterGateway;
pub use registry::JsonAgentStore;
