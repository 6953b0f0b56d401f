//! Port back into the task registry for loads and claims.

use crate::identity::domain::UserId;
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Outcome of attempting to claim a task for a helper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The helper won the claim.
    Claimed(Task),
    /// The task is no longer claimable by this helper.
    Unavailable,
}

/// Errors surfaced by the task gateway.
#[derive(Debug, Clone, Error)]
pub enum TaskGatewayError {
    /// No task exists for the identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// The registry call failed.
    #[error("task registry call failed: {0}")]
    Gateway(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskGatewayError {
    /// Wraps an arbitrary error as a gateway failure.
    #[must_use]
    pub fn gateway(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Gateway(Arc::new(error))
    }
}

/// Port for reading tasks and claiming them on a helper's behalf.
///
/// Accepts route through the registry's claim path, so its optimistic
/// concurrency still picks the single winner when replies race.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Loads a task, returning `None` when it does not exist.
    async fn load(&self, task_id: TaskId) -> Result<Option<Task>, TaskGatewayError>;

    /// Claims the task for the helper.
    async fn claim_for(
        &self,
        task_id: TaskId,
        helper: UserId,
    ) -> Result<ClaimOutcome, TaskGatewayError>;
}
