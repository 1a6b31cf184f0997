//! Pipeline run aggregate

use crate::core::error::DomainError;
use crate::core::query::Query;
use crate::pipeline::state::{RunEvent, RunState};
use crate::pipeline::value_objects::{
    DraftResponse, QueryResponse, ReviewVerdict, RoutingDecision,
};

/// One (draft, verdict) pair of the dispatch/review loop
///
/// The verdict is `None` while the draft is under review.
#[derive(Debug, Clone)]
pub struct IterationRecord {
    pub draft: DraftResponse,
    pub verdict: Option<ReviewVerdict>,
}

/// Aggregate tracking one query through the pipeline
///
/// Created once routing has succeeded, mutated only through the event
/// methods below (each of which consults the pure state machine), and
/// frozen as soon as a terminal state is reached: every mutator fails on
/// a terminal run. The routing decision is fixed at construction and has
/// no setter.
///
/// The run also owns the human-readable log. Entry accounting: one routing
/// entry, one entry per dispatch attempt, one entry per review outcome
/// (the approval entry doubles as the final-answer marker), and one extra
/// marker only when the iteration bound is exhausted.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    query: Query,
    route: RoutingDecision,
    iterations: Vec<IterationRecord>,
    state: RunState,
    iteration_count: u32,
    max_iterations: u32,
    log: Vec<String>,
}

impl PipelineRun {
    /// Starts a run for a routed query.
    pub fn new(query: Query, route: RoutingDecision, max_iterations: u32) -> Self {
        let log = vec![format!(
            "Router: selected {} ({})",
            route.agent_name, route.agent_id
        )];
        Self {
            query,
            route,
            iterations: Vec::new(),
            state: RunState::Routed,
            iteration_count: 0,
            max_iterations,
            log,
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn route(&self) -> &RoutingDecision {
        &self.route
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Number of reject/redispatch cycles performed so far.
    ///
    /// Excludes the initial dispatch: a run approved on the first draft
    /// reports 0.
    pub fn iteration_count(&self) -> u32 {
        self.iteration_count
    }

    pub fn iterations(&self) -> &[IterationRecord] {
        &self.iterations
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Most recent draft, if any dispatch has completed.
    pub fn last_draft(&self) -> Option<&DraftResponse> {
        self.iterations.last().map(|record| &record.draft)
    }

    /// Verdict of the most recent completed review.
    pub fn last_verdict(&self) -> Option<&ReviewVerdict> {
        self.iterations
            .last()
            .and_then(|record| record.verdict.as_ref())
    }

    /// Reviewer feedback to apply to the upcoming dispatch, when the run
    /// is in a redispatch cycle.
    pub fn pending_feedback(&self) -> Option<&str> {
        match self.state {
            RunState::Dispatching { iteration } if iteration > 0 => self
                .last_verdict()
                .and_then(|verdict| verdict.feedback.as_deref()),
            _ => None,
        }
    }

    /// Enters the first dispatch.
    pub fn begin_dispatch(&mut self) -> Result<(), DomainError> {
        self.state = self.state.apply(RunEvent::DispatchStarted, self.max_iterations)?;
        self.log_attempt(0, false);
        Ok(())
    }

    /// Records the draft returned by the in-flight dispatch call.
    pub fn record_draft(&mut self, content: impl Into<String>) -> Result<(), DomainError> {
        let next = self.state.apply(RunEvent::DraftProduced, self.max_iterations)?;
        let Some(iteration) = next.iteration() else {
            return Err(DomainError::InvalidTransition {
                state: self.state.as_str().to_string(),
                event: RunEvent::DraftProduced.as_str().to_string(),
            });
        };
        self.iterations.push(IterationRecord {
            draft: DraftResponse::new(content, self.route.agent_id.clone(), iteration),
            verdict: None,
        });
        self.state = next;
        Ok(())
    }

    /// Records the review outcome for the draft under review.
    ///
    /// An approval terminates the run. A revision request either re-enters
    /// dispatch with the reviewer's feedback pending, or, once the bound is
    /// hit, terminates the run with the last draft standing.
    pub fn record_verdict(&mut self, verdict: ReviewVerdict) -> Result<(), DomainError> {
        let event = if verdict.is_approved() {
            RunEvent::Approved
        } else {
            RunEvent::Rejected
        };
        let next = self.state.apply(event, self.max_iterations)?;
        let Some(record) = self.iterations.last_mut() else {
            return Err(DomainError::InvalidTransition {
                state: self.state.as_str().to_string(),
                event: event.as_str().to_string(),
            });
        };

        let feedback = verdict.feedback.clone();
        record.verdict = Some(verdict);

        match next {
            RunState::Approved => {
                self.log
                    .push("Reviewer: draft approved, final answer ready".to_string());
            }
            RunState::Dispatching { iteration } => {
                self.log_rejection(feedback.as_deref());
                self.iteration_count = iteration;
                self.log_attempt(iteration, true);
            }
            RunState::LimitReached => {
                self.log_rejection(feedback.as_deref());
                self.log
                    .push("Iteration limit reached, returning last draft".to_string());
            }
            _ => {}
        }

        self.state = next;
        Ok(())
    }

    /// Aborts the run after an upstream failure.
    pub fn fail(&mut self) -> Result<(), DomainError> {
        self.state = self.state.apply(RunEvent::UpstreamFailed, self.max_iterations)?;
        Ok(())
    }

    /// Projects the run into the externally visible response shape.
    ///
    /// Defined only for terminal, non-errored runs: an errored run produces
    /// a fault, never a response, and a live run has nothing final to report.
    pub fn assemble(&self) -> Result<QueryResponse, DomainError> {
        match self.state {
            RunState::Approved | RunState::LimitReached => {}
            RunState::Errored => return Err(DomainError::RunErrored),
            _ => return Err(DomainError::RunNotTerminal),
        }

        let draft = self.last_draft().ok_or(DomainError::RunNotTerminal)?;
        let verdict = self.last_verdict().ok_or(DomainError::RunNotTerminal)?;

        Ok(QueryResponse {
            input: self.query.content().to_string(),
            route: self.route.agent_id.to_string(),
            agent_response: draft.content.clone(),
            review_result: verdict.status,
            context: self.log.join("\n"),
            iteration_count: self.iteration_count,
            log: self.log.clone(),
        })
    }

    fn log_attempt(&mut self, iteration: u32, with_feedback: bool) {
        let attempt = iteration + 1;
        if with_feedback {
            self.log.push(format!(
                "Dispatcher: attempt {attempt} sent to {} (reviewer feedback applied)",
                self.route.agent_id
            ));
        } else {
            self.log.push(format!(
                "Dispatcher: attempt {attempt} sent to {}",
                self.route.agent_id
            ));
        }
    }

    fn log_rejection(&mut self, feedback: Option<&str>) {
        match feedback {
            Some(feedback) => self
                .log
                .push(format!("Reviewer: revision requested: {feedback}")),
            None => self.log.push("Reviewer: revision requested".to_string()),
        }
    }
}
