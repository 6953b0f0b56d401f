//! Outbound port for handing open tasks to the dispatch engine.

use crate::task::domain::TaskId;
use async_trait::async_trait;
use thiserror::Error;

/// Request to fan a task out to nearby helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchRequest {
    task_id: TaskId,
    radius_m: Option<u64>,
}

impl DispatchRequest {
    /// Creates a request using the urgency-derived radius.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            radius_m: None,
        }
    }

    /// Overrides the search radius in metres.
    #[must_use]
    pub const fn with_radius(mut self, radius_m: u64) -> Self {
        self.radius_m = Some(radius_m);
        self
    }

    /// Returns the task to dispatch.
    #[must_use]
    pub const fn task_id(self) -> TaskId {
        self.task_id
    }

    /// Returns the radius override, if any.
    #[must_use]
    pub const fn radius_m(self) -> Option<u64> {
        self.radius_m
    }
}

/// Errors surfaced when enqueueing dispatch work.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchQueueError {
    /// The receiving side of the queue has shut down.
    #[error("dispatch queue is closed")]
    Closed,
}

/// Port for enqueueing dispatch work.
///
/// The registry enqueues after posting and after a withdrawal reopens a
/// task; the dispatch engine consumes requests asynchronously.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DispatchQueue: Send + Sync {
    /// Enqueues one dispatch request.
    async fn enqueue(&self, request: DispatchRequest) -> Result<(), DispatchQueueError>;
}
