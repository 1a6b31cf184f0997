//! Run state machine
//!
//! The reject/redispatch loop is an explicit finite-state machine: an
//! enumerated state, an enumerated event, and one pure transition function
//! parameterized by the iteration bound. The aggregate in
//! [`crate::pipeline::entities`] drives it; nothing here performs I/O.

use serde::{Deserialize, Serialize};

use crate::core::error::DomainError;

/// Lifecycle state of one pipeline run
///
/// `Dispatching` and `Reviewing` carry the current iteration index, where
/// the first dispatch is iteration 0. A rejection either re-enters
/// `Dispatching` with the index incremented or, once the bound is hit,
/// lands in `LimitReached`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Router has chosen an agent; nothing dispatched yet
    Routed,
    /// A dispatch call is in flight for the given iteration
    Dispatching { iteration: u32 },
    /// A draft exists and the reviewer is judging it
    Reviewing { iteration: u32 },
    /// Terminal: the reviewer accepted a draft
    Approved,
    /// Terminal: the iteration bound was hit; the last draft stands
    LimitReached,
    /// Terminal: an upstream failure aborted the run
    Errored,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Routed => "routed",
            RunState::Dispatching { .. } => "dispatching",
            RunState::Reviewing { .. } => "reviewing",
            RunState::Approved => "approved",
            RunState::LimitReached => "limit_reached",
            RunState::Errored => "errored",
        }
    }

    /// Terminal states permit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunState::Approved | RunState::LimitReached | RunState::Errored
        )
    }

    /// Iteration index while the loop is active, `None` otherwise.
    pub fn iteration(&self) -> Option<u32> {
        match self {
            RunState::Dispatching { iteration } | RunState::Reviewing { iteration } => {
                Some(*iteration)
            }
            _ => None,
        }
    }

    /// Computes the successor state for an event.
    ///
    /// Pure function of (state, event, bound): the whole bounding and
    /// fallback policy lives in this match. Any pair outside the table is
    /// an invalid transition.
    pub fn apply(&self, event: RunEvent, max_iterations: u32) -> Result<RunState, DomainError> {
        match (self, event) {
            (RunState::Routed, RunEvent::DispatchStarted) => {
                Ok(RunState::Dispatching { iteration: 0 })
            }
            (RunState::Dispatching { iteration }, RunEvent::DraftProduced) => {
                Ok(RunState::Reviewing {
                    iteration: *iteration,
                })
            }
            (RunState::Reviewing { .. }, RunEvent::Approved) => Ok(RunState::Approved),
            (RunState::Reviewing { iteration }, RunEvent::Rejected) => {
                if *iteration < max_iterations {
                    Ok(RunState::Dispatching {
                        iteration: iteration + 1,
                    })
                } else {
                    Ok(RunState::LimitReached)
                }
            }
            (state, RunEvent::UpstreamFailed) if !state.is_terminal() => Ok(RunState::Errored),
            (state, event) => Err(DomainError::InvalidTransition {
                state: state.as_str().to_string(),
                event: event.as_str().to_string(),
            }),
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Events driving the run state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEvent {
    /// A dispatch call is about to be issued
    DispatchStarted,
    /// The dispatch call returned a draft
    DraftProduced,
    /// The reviewer accepted the draft
    Approved,
    /// The reviewer requested a revision
    Rejected,
    /// Dispatch or review failed upstream
    UpstreamFailed,
}

impl RunEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunEvent::DispatchStarted => "dispatch_started",
            RunEvent::DraftProduced => "draft_produced",
            RunEvent::Approved => "approved",
            RunEvent::Rejected => "rejected",
            RunEvent::UpstreamFailed => "upstream_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let state = RunState::Routed;
        let state = state.apply(RunEvent::DispatchStarted, 3).expect("dispatch");
        assert_eq!(state, RunState::Dispatching { iteration: 0 });

        let state = state.apply(RunEvent::DraftProduced, 3).expect("draft");
        assert_eq!(state, RunState::Reviewing { iteration: 0 });

        let state = state.apply(RunEvent::Approved, 3).expect("approve");
        assert_eq!(state, RunState::Approved);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_rejection_increments_iteration() {
        let state = RunState::Reviewing { iteration: 0 };
        let state = state.apply(RunEvent::Rejected, 3).expect("reject");
        assert_eq!(state, RunState::Dispatching { iteration: 1 });
    }

    #[test]
    fn test_rejection_at_bound_reaches_limit() {
        let state = RunState::Reviewing { iteration: 3 };
        let state = state.apply(RunEvent::Rejected, 3).expect("reject");
        assert_eq!(state, RunState::LimitReached);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_rejection_just_below_bound_continues() {
        let state = RunState::Reviewing { iteration: 2 };
        let state = state.apply(RunEvent::Rejected, 3).expect("reject");
        assert_eq!(state, RunState::Dispatching { iteration: 3 });
    }

    #[test]
    fn test_zero_bound_exhausts_on_first_rejection() {
        let state = RunState::Reviewing { iteration: 0 };
        let state = state.apply(RunEvent::Rejected, 0).expect("reject");
        assert_eq!(state, RunState::LimitReached);
    }

    #[test]
    fn test_upstream_failure_from_any_active_state() {
        for state in [
            RunState::Routed,
            RunState::Dispatching { iteration: 1 },
            RunState::Reviewing { iteration: 2 },
        ] {
            let next = state.apply(RunEvent::UpstreamFailed, 3).expect("fail");
            assert_eq!(next, RunState::Errored);
        }
    }

    #[test]
    fn test_terminal_states_reject_all_events() {
        for state in [RunState::Approved, RunState::LimitReached, RunState::Errored] {
            for event in [
                RunEvent::DispatchStarted,
                RunEvent::DraftProduced,
                RunEvent::Approved,
                RunEvent::Rejected,
                RunEvent::UpstreamFailed,
            ] {
                assert!(
                    state.apply(event, 3).is_err(),
                    "{state} must not accept {}",
                    event.as_str()
                );
            }
        }
    }

    #[test]
    fn test_out_of_order_events_rejected() {
        assert!(RunState::Routed.apply(RunEvent::Approved, 3).is_err());
        assert!(RunState::Routed.apply(RunEvent::DraftProduced, 3).is_err());
        assert!(
            RunState::Dispatching { iteration: 0 }
                .apply(RunEvent::Rejected, 3)
                .is_err()
        );
        assert!(
            RunState::Reviewing { iteration: 0 }
                .apply(RunEvent::DispatchStarted, 3)
                .is_err()
        );
    }

    #[test]
    fn test_iteration_accessor() {
        assert_eq!(RunState::Dispatching { iteration: 2 }.iteration(), Some(2));
        assert_eq!(RunState::Reviewing { iteration: 0 }.iteration(), Some(0));
        assert_eq!(RunState::Approved.iteration(), None);
        assert_eq!(RunState::Routed.iteration(), None);
    }
}
