//! Pipeline value objects - immutable types flowing through one run.
//!
//! - [`RoutingDecision`] - the router's choice of agent for a query
//! - [`DraftResponse`] - one candidate answer produced by a dispatch
//! - [`ReviewVerdict`] - the reviewer's approve/revise decision
//! - [`QueryResponse`] - the externally visible result of a finished run

use serde::{Deserialize, Serialize};

use crate::agent::value_objects::AgentId;
use crate::core::error::DomainError;

/// The router's decision for one query
///
/// Exactly one decision exists per run and it never changes after the
/// first dispatch. The raw classifier reply is kept as opaque rationale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Chosen agent, guaranteed to be registered at decision time
    pub agent_id: AgentId,
    /// Display name of the chosen agent, for the run log
    pub agent_name: String,
    /// Raw classifier output, not interpreted further
    pub rationale: String,
}

impl RoutingDecision {
    pub fn new(
        agent_id: impl Into<AgentId>,
        agent_name: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            agent_name: agent_name.into(),
            rationale: rationale.into(),
        }
    }
}

/// One candidate answer produced by a dispatch call
///
/// Superseded, never mutated, by the draft of the next iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftResponse {
    /// Free-text answer content
    pub content: String,
    /// Agent that produced this draft
    pub agent_id: AgentId,
    /// Iteration index at which it was produced (first dispatch is 0)
    pub iteration: u32,
}

impl DraftResponse {
    pub fn new(content: impl Into<String>, agent_id: impl Into<AgentId>, iteration: u32) -> Self {
        Self {
            content: content.into(),
            agent_id: agent_id.into(),
            iteration,
        }
    }
}

/// Review outcome, restricted to exactly two wire values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Approved,
    NeedsRevision,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Approved => "approved",
            ReviewStatus::NeedsRevision => "needs_revision",
        }
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The reviewer's decision on one draft
///
/// Feedback is required and non-empty on revision requests and absent on
/// approvals; the constructors make the invalid combinations unrepresentable
/// in practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewVerdict {
    pub status: ReviewStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl ReviewVerdict {
    /// Creates an approval verdict.
    pub fn approved() -> Self {
        Self {
            status: ReviewStatus::Approved,
            feedback: None,
        }
    }

    /// Creates a revision request carrying the reviewer's feedback.
    ///
    /// Fails when the feedback is empty or whitespace: a rejection without
    /// actionable feedback cannot drive a materially different redispatch.
    pub fn needs_revision(feedback: impl Into<String>) -> Result<Self, DomainError> {
        let feedback = feedback.into();
        if feedback.trim().is_empty() {
            return Err(DomainError::EmptyReviewFeedback);
        }
        Ok(Self {
            status: ReviewStatus::NeedsRevision,
            feedback: Some(feedback),
        })
    }

    /// Returns `true` when the draft was approved.
    pub fn is_approved(&self) -> bool {
        self.status == ReviewStatus::Approved
    }
}

/// Externally visible result of one finished, non-errored run
///
/// Field names and shapes are the wire contract consumed by the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Original query text, verbatim
    pub input: String,
    /// Id of the agent that produced the answer
    pub route: String,
    /// Final draft content (last draft on exhaustion)
    pub agent_response: String,
    /// `approved`, or `needs_revision` when the iteration bound was hit
    pub review_result: ReviewStatus,
    /// The run log joined into one newline-separated text block
    pub context: String,
    /// Number of reject/redispatch cycles performed
    pub iteration_count: u32,
    /// Ordered human-readable step descriptions
    pub log: Vec<String>,
}
