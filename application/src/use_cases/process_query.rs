//! Process query use case
//!
//! The iteration controller. Routes the query once, then drives the bounded
//! dispatch/review loop over the run aggregate:
//!
//! 1. Routing - pick one registered agent for the query
//! 2. Dispatch - ask that agent for a draft answer
//! 3. Review - approve the draft or send it back with feedback
//! 4. Repeat dispatch/review until approval or the iteration bound
//!
//! Every gateway call runs under the configured step timeout; a timeout or
//! any other upstream failure aborts the run as a fault rather than being
//! retried. An exhausted loop is not a fault: the last draft is returned
//! with its unapproved verdict.

mod dispatch;
mod router;
mod review;

use crate::config::PipelineConfig;
use crate::ports::agent_store::{AgentStore, RegistryError};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use std::future::Future;
use std::sync::Arc;
use switchboard_domain::{DomainError, PipelineRun, Query, QueryResponse, RunState};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur while processing a query
#[derive(Error, Debug)]
pub enum ProcessQueryError {
    #[error("No agents available to route to")]
    NoAgentAvailable,

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Upstream generation failed: {0}")]
    Upstream(#[from] GatewayError),

    #[error("Reviewer produced an unusable verdict: {0}")]
    InvalidVerdict(String),

    #[error("Run state error: {0}")]
    State(#[from] DomainError),

    #[error("Operation cancelled")]
    Cancelled,
}

/// Use case for processing one query through the pipeline
pub struct ProcessQueryUseCase {
    gateway: Arc<dyn LlmGateway>,
    agents: Arc<dyn AgentStore>,
    config: PipelineConfig,
    cancellation_token: Option<CancellationToken>,
}

impl ProcessQueryUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        agents: Arc<dyn AgentStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            gateway,
            agents,
            config,
            cancellation_token: None,
        }
    }

    /// Attach a token that aborts in-flight runs on shutdown.
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Process one query to a terminal, non-errored outcome.
    ///
    /// Strictly sequential within the run: each dispatch depends on the
    /// previous review's feedback. Concurrent calls are independent runs.
    pub async fn execute(&self, query: Query) -> Result<QueryResponse, ProcessQueryError> {
        let agents = self.agents.list().await?;
        let decision = self
            .bounded(router::route(self.gateway.as_ref(), &agents, &query))
            .await?;
        let agent = agents
            .iter()
            .find(|candidate| candidate.id == decision.agent_id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(decision.agent_id.clone()))?;

        info!("Query routed to {}", agent.id);

        let mut run = PipelineRun::new(query, decision, self.config.max_iterations);
        run.begin_dispatch()?;

        loop {
            let feedback = run.pending_feedback().map(str::to_string);
            let draft = match self
                .bounded(async {
                    dispatch::dispatch(
                        self.gateway.as_ref(),
                        &agent,
                        run.query(),
                        feedback.as_deref(),
                    )
                    .await
                    .map_err(ProcessQueryError::from)
                })
                .await
            {
                Ok(draft) => draft,
                Err(error) => {
                    run.fail()?;
                    return Err(error);
                }
            };
            run.record_draft(draft.clone())?;

            let verdict = match self
                .bounded(review::review(self.gateway.as_ref(), run.query(), &draft))
                .await
            {
                Ok(verdict) => verdict,
                Err(error) => {
                    run.fail()?;
                    return Err(error);
                }
            };
            debug!("Review verdict: {}", verdict.status);
            run.record_verdict(verdict)?;

            if run.state().is_terminal() {
                break;
            }
        }

        if run.state() == RunState::LimitReached {
            warn!(
                "Iteration limit reached after {} revision cycle(s), returning last draft",
                run.iteration_count()
            );
        } else {
            info!(
                "Query approved after {} revision cycle(s)",
                run.iteration_count()
            );
        }

        Ok(run.assemble()?)
    }

    /// Runs one gateway-bound step under the per-step timeout and, when a
    /// cancellation token is attached, under shutdown cancellation.
    async fn bounded<T>(
        &self,
        operation: impl Future<Output = Result<T, ProcessQueryError>>,
    ) -> Result<T, ProcessQueryError> {
        let guarded = async {
            match tokio::time::timeout(self.config.step_timeout, operation).await {
                Ok(result) => result,
                Err(_) => Err(ProcessQueryError::Upstream(GatewayError::Timeout)),
            }
        };

        if let Some(token) = &self.cancellation_token {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(ProcessQueryError::Cancelled),
                result = guarded => result,
            }
        } else {
            guarded.await
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::ports::llm_gateway::ChatRequest;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;
    use switchboard_domain::{Agent, AgentId, AgentUpdate};

    /// Gateway answering from a scripted reply queue, recording every request
    pub(crate) struct ScriptedGateway {
        replies: Mutex<VecDeque<Result<String, GatewayError>>>,
        calls: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedGateway {
        pub(crate) fn new(replies: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().collect()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn replies(replies: &[&str]) -> Self {
            Self::new(replies.iter().map(|reply| Ok(reply.to_string())).collect())
        }

        pub(crate) fn calls(&self) -> Vec<ChatRequest> {
            self.calls.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn complete(&self, request: ChatRequest) -> Result<String, GatewayError> {
            self.calls.lock().expect("lock").push(request);
            self.replies
                .lock()
                .expect("lock")
                .pop_front()
                .expect("gateway script exhausted")
        }
    }

    /// Gateway that never answers within any reasonable step timeout
    pub(crate) struct StalledGateway;

    #[async_trait]
    impl LlmGateway for StalledGateway {
        async fn complete(&self, _request: ChatRequest) -> Result<String, GatewayError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(GatewayError::RequestFailed("unreachable".to_string()))
        }
    }

    /// Read-only in-memory registry for pipeline tests
    pub(crate) struct MemoryAgents {
        agents: Vec<Agent>,
    }

    impl MemoryAgents {
        pub(crate) fn with_agents(agents: Vec<Agent>) -> Self {
            Self { agents }
        }

        pub(crate) fn empty() -> Self {
            Self { agents: Vec::new() }
        }
    }

    #[async_trait]
    impl AgentStore for MemoryAgents {
        async fn list(&self) -> Result<Vec<Agent>, RegistryError> {
            Ok(self.agents.clone())
        }

        async fn get(&self, id: &AgentId) -> Result<Agent, RegistryError> {
            self.agents
                .iter()
                .find(|agent| &agent.id == id)
                .cloned()
                .ok_or_else(|| RegistryError::NotFound(id.clone()))
        }

        async fn update(
            &self,
            _id: &AgentId,
            _update: AgentUpdate,
        ) -> Result<Agent, RegistryError> {
            Err(RegistryError::Storage("update not scripted".to_string()))
        }
    }

    pub(crate) fn sample_agents() -> Vec<Agent> {
        vec![
            Agent::new(
                "agent1",
                "Prompt Agent",
                "Writes and refines prompts",
                "You write prompts.",
                "bg-blue-500",
                "2024-01-01T00:00:00+00:00",
            ),
            Agent::new(
                "agent2",
                "Requirements Agent",
                "Gathers and analyzes requirements",
                "You are a requirements analyst.",
                "bg-green-500",
                "2024-01-01T00:00:00+00:00",
            ),
        ]
    }
}
