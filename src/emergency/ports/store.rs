//! Persistence port for emergency alerts.

use crate::emergency::domain::EmergencyAlert;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Convenient result alias for alert store operations.
pub type AlertStoreResult<T> = Result<T, AlertStoreError>;

/// Errors surfaced by alert store implementations.
#[derive(Debug, Clone, Error)]
pub enum AlertStoreError {
    /// An alert already exists for the task.
    #[error("task {0} already has an emergency alert")]
    DuplicateAlert(TaskId),
    /// Underlying persistence failure.
    #[error("persistence failure: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AlertStoreError {
    /// Wraps an arbitrary error as a persistence failure.
    #[must_use]
    pub fn persistence(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(error))
    }
}

/// Port for persisting emergency alerts.
///
/// Alerts are immutable, so the port offers no update.
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Inserts a freshly raised alert.
    async fn insert(&self, alert: &EmergencyAlert) -> AlertStoreResult<()>;

    /// Fetches the alert raised for a task, if any.
    async fn find_by_task(&self, task_id: TaskId) -> AlertStoreResult<Option<EmergencyAlert>>;
}
