//! Application layer for switchboard
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use ports::{
    agent_store::{AgentStore, RegistryError},
    llm_gateway::{ChatRequest, GatewayError, LlmGateway},
    run_store::{HistoryError, RunStore, StoredRun},
};
pub use use_cases::agent_directory::AgentDirectory;
pub use use_cases::process_query::{ProcessQueryError, ProcessQueryUseCase};
