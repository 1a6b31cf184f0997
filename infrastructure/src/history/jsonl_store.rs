//! JSONL run history store
//!
//! Each completed run is serialized as a single JSON line and appended to
//! the history file. Listing reads the file back, newest first; damaged
//! lines are skipped so one bad record never hides the rest of the history.

use async_trait::async_trait;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use switchboard_application::{HistoryError, RunStore, StoredRun};
use tracing::warn;

pub struct JsonlRunStore {
    path: PathBuf,
    // Serializes appends so concurrent runs never interleave lines
    write_lock: Mutex<()>,
}

impl JsonlRunStore {
    /// Creates a store appending to `path`. Parent directories are created
    /// up front; the file itself appears on the first save.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                HistoryError::Storage(format!("could not create {}: {e}", parent.display()))
            })?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RunStore for JsonlRunStore {
    async fn save(&self, run: &StoredRun) -> Result<(), HistoryError> {
        let line = serde_json::to_string(run)
            .map_err(|e| HistoryError::Storage(format!("could not serialize run: {e}")))?;

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                HistoryError::Storage(format!("could not open {}: {e}", self.path.display()))
            })?;
        writeln!(file, "{line}").map_err(|e| {
            HistoryError::Storage(format!("could not append to {}: {e}", self.path.display()))
        })?;
        Ok(())
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<StoredRun>, HistoryError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(HistoryError::Storage(format!(
                    "could not read {}: {e}",
                    self.path.display()
                )));
            }
        };

        let runs: Vec<StoredRun> = raw
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str(line) {
                Ok(run) => Some(run),
                Err(e) => {
                    warn!("Skipping damaged history line: {e}");
                    None
                }
            })
            .collect();

        Ok(runs.into_iter().rev().skip(offset).take(limit).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_domain::{QueryResponse, ReviewStatus};

    fn sample_run(input: &str) -> StoredRun {
        StoredRun {
            completed_at: "2024-03-01T00:00:00.000Z".to_string(),
            response: QueryResponse {
                input: input.to_string(),
                route: "agent2".to_string(),
                agent_response: "the answer".to_string(),
                review_result: ReviewStatus::Approved,
                context: "Router: selected Requirements Agent (agent2)".to_string(),
                iteration_count: 0,
                log: vec!["Router: selected Requirements Agent (agent2)".to_string()],
            },
        }
    }

    #[tokio::test]
    async fn test_list_on_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlRunStore::new(dir.path().join("runs.jsonl")).unwrap();

        assert!(store.list(20, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_list_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlRunStore::new(dir.path().join("runs.jsonl")).unwrap();

        for n in 0..3 {
            store.save(&sample_run(&format!("query {n}"))).await.unwrap();
        }

        let runs = store.list(20, 0).await.unwrap();
        let inputs: Vec<&str> = runs.iter().map(|r| r.response.input.as_str()).collect();
        assert_eq!(inputs, ["query 2", "query 1", "query 0"]);
    }

    #[tokio::test]
    async fn test_limit_and_offset_window() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlRunStore::new(dir.path().join("runs.jsonl")).unwrap();

        for n in 0..5 {
            store.save(&sample_run(&format!("query {n}"))).await.unwrap();
        }

        let page = store.list(2, 1).await.unwrap();
        let inputs: Vec<&str> = page.iter().map(|r| r.response.input.as_str()).collect();
        assert_eq!(inputs, ["query 3", "query 2"]);

        // Offset past the end is an empty page, not an error
        assert!(store.list(2, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.jsonl");

        let store = JsonlRunStore::new(&path).unwrap();
        store.save(&sample_run("persisted")).await.unwrap();
        drop(store);

        let reopened = JsonlRunStore::new(&path).unwrap();
        let runs = reopened.list(20, 0).await.unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].response.input, "persisted");
    }

    #[tokio::test]
    async fn test_damaged_line_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.jsonl");

        let store = JsonlRunStore::new(&path).unwrap();
        store.save(&sample_run("good")).await.unwrap();
        {
            let mut file = OpenOptions::new().append(true).open(&path).unwrap();
            writeln!(file, "{{ damaged line").unwrap();
        }
        store.save(&sample_run("also good")).await.unwrap();

        let runs = store.list(20, 0).await.unwrap();
        let inputs: Vec<&str> = runs.iter().map(|r| r.response.input.as_str()).collect();
        assert_eq!(inputs, ["also good", "good"]);
    }
}
