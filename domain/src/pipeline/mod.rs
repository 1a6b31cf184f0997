//! Pipeline domain module
//!
//! The run aggregate, its state machine, the value objects flowing through
//! one query's route/dispatch/review loop, and the pure text parsing for
//! classifier and reviewer replies.

pub mod entities;
pub mod parsing;
pub mod state;
pub mod value_objects;

pub use entities::{IterationRecord, PipelineRun};
pub use parsing::{normalize_route_reply, parse_review_reply};
pub use state::{RunEvent, RunState};
pub use value_objects::{
    DraftResponse, QueryResponse, ReviewStatus, ReviewVerdict, RoutingDecision,
};
