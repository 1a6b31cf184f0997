//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as the iteration bound and per-step timeout of the pipeline.

use std::time::Duration;

/// Pipeline behavior configuration.
///
/// `max_iterations` bounds the reject/redispatch cycle: a run performs at
/// most `max_iterations` redispatches after the initial attempt before the
/// last draft is surfaced unapproved. `step_timeout` caps every individual
/// gateway call (routing, dispatch, review) so a run never hangs on a stuck
/// upstream.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum number of reject/redispatch cycles per run
    pub max_iterations: u32,
    /// Timeout applied to each gateway call
    pub step_timeout: Duration,
}

impl PipelineConfig {
    /// Creates a PipelineConfig with the step timeout given in seconds.
    pub fn new(max_iterations: u32, step_timeout_secs: u64) -> Self {
        Self {
            max_iterations,
            step_timeout: Duration::from_secs(step_timeout_secs),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_iterations: 3,
            step_timeout: Duration::from_secs(90),
        }
    }
}
