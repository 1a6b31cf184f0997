//! Shared handler state

use std::sync::Arc;

use switchboard_application::{AgentDirectory, ProcessQueryUseCase, RunStore};

/// Dependencies shared by every route handler, cloned per request
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ProcessQueryUseCase>,
    pub directory: Arc<AgentDirectory>,
    pub history: Arc<dyn RunStore>,
}

impl AppState {
    pub fn new(
        pipeline: Arc<ProcessQueryUseCase>,
        directory: Arc<AgentDirectory>,
        history: Arc<dyn RunStore>,
    ) -> Self {
        Self {
            pipeline,
            directory,
            history,
        }
    }
}
