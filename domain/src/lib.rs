//! Domain layer for switchboard
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Pipeline
//!
//! Every query travels the same pipeline: a router picks one specialized
//! agent, a dispatcher asks that agent for a draft answer, a reviewer either
//! approves the draft or sends it back with feedback, and a bounded iteration
//! loop repeats dispatch/review until approval or exhaustion.
//!
//! ## Run
//!
//! [`PipelineRun`] is the aggregate tracking one query through that loop. Its
//! lifecycle is an explicit state machine ([`RunState`]) with pure
//! transitions, so the bounding and fallback policy is testable in isolation.

pub mod agent;
pub mod core;
pub mod pipeline;
pub mod prompt;

// Re-export commonly used types
pub use agent::{
    entities::{Agent, AgentSummary, AgentUpdate},
    value_objects::AgentId,
};
pub use core::{error::DomainError, query::Query};
pub use pipeline::{
    entities::{IterationRecord, PipelineRun},
    parsing::{normalize_route_reply, parse_review_reply},
    state::{RunEvent, RunState},
    value_objects::{DraftResponse, QueryResponse, ReviewStatus, ReviewVerdict, RoutingDecision},
};
pub use prompt::PromptTemplate;
