//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("Agent {0} cannot be empty")]
    EmptyAgentField(&'static str),

    #[error("Revision requested without feedback")]
    EmptyReviewFeedback,

    #[error("Unrecognized review verdict: {0}")]
    UnrecognizedVerdict(String),

    #[error("Invalid transition: {event} while {state}")]
    InvalidTransition { state: String, event: String },

    #[error("Run is not terminal yet")]
    RunNotTerminal,

    #[error("Errored run has no response to assemble")]
    RunErrored,
}

impl DomainError {
    /// Check if this error is a payload validation failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyQuery | DomainError::EmptyAgentField(_)
        )
    }
}
