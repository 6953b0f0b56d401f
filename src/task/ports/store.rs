//! Persistence port for task records.

use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Convenient result alias for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Errors surfaced by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A record with the same identifier already exists.
    #[error("task {0} already exists")]
    DuplicateTask(TaskId),
    /// No record exists for the identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// The stored version no longer matches the caller's snapshot.
    #[error("task {task_id} version mismatch: expected {expected}, found {actual}")]
    VersionConflict {
        /// Identifier of the contested record.
        task_id: TaskId,
        /// Version the caller read before mutating.
        expected: u64,
        /// Version currently persisted.
        actual: u64,
    },
    /// Underlying persistence failure.
    #[error("persistence failure: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps an arbitrary error as a persistence failure.
    #[must_use]
    pub fn persistence(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(error))
    }
}

/// Port for persisting task records.
///
/// `update` performs a compare-and-swap on the record version. Racing
/// claims of the same open task therefore resolve to exactly one winner;
/// every loser observes [`TaskStoreError::VersionConflict`] and reloads.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a newly posted task.
    async fn insert(&self, task: &Task) -> TaskStoreResult<()>;

    /// Replaces a stored record if its version still matches `expected_version`.
    async fn update(&self, task: &Task, expected_version: u64) -> TaskStoreResult<()>;

    /// Fetches a task by identifier.
    async fn find_by_id(&self, task_id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Lists every task currently open for claiming.
    async fn list_open(&self) -> TaskStoreResult<Vec<Task>>;
}
