//! Run history port
//!
//! Defines the interface for persisting completed runs. History is an
//! explicitly injected dependency of whoever needs it, never ambient state;
//! faulted runs are not persisted.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use switchboard_domain::QueryResponse;
use thiserror::Error;

/// Errors that can occur during history operations
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History storage error: {0}")]
    Storage(String),
}

/// One completed run as persisted in history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRun {
    /// RFC 3339 completion timestamp
    pub completed_at: String,
    /// The response that was delivered to the caller
    pub response: QueryResponse,
}

impl StoredRun {
    /// Stamps a response with the current completion time.
    pub fn new(response: QueryResponse) -> Self {
        let completed_at =
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        Self {
            completed_at,
            response,
        }
    }
}

/// Persistent store of completed runs
#[async_trait]
pub trait RunStore: Send + Sync {
    /// Append one completed run
    async fn save(&self, run: &StoredRun) -> Result<(), HistoryError>;

    /// Window of completed runs, newest first
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<StoredRun>, HistoryError>;
}
