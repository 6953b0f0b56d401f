//! Port into the task registry for opening emergency tasks.

use crate::geo::GeoPoint;
use crate::identity::domain::UserId;
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Pre-filled task fields for an emergency broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyTaskSpec {
    /// User raising the alert.
    pub requester: UserId,
    /// Task title shown to helpers.
    pub title: String,
    /// Task description shown to helpers.
    pub description: String,
    /// Where help is needed.
    pub location: GeoPoint,
    /// Street address shown to helpers.
    pub address: String,
    /// Offered price in rupees.
    pub price_rupees: u64,
    /// Broadcast radius in metres.
    pub radius_m: u64,
}

/// Errors surfaced when opening or reading emergency tasks.
#[derive(Debug, Clone, Error)]
pub enum AlertTaskError {
    /// The registry rejected the pre-filled task.
    #[error("emergency task rejected: {reason}")]
    Rejected {
        /// Validation diagnostic from the registry.
        reason: String,
    },
    /// The registry call failed.
    #[error("task registry call failed: {0}")]
    Access(Arc<dyn std::error::Error + Send + Sync>),
}

impl AlertTaskError {
    /// Wraps an arbitrary error as a registry access failure.
    #[must_use]
    pub fn access(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Access(Arc::new(error))
    }
}

/// Port for opening emergency tasks and reading them back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertTaskGateway: Send + Sync {
    /// Opens an emergency-tier task from the spec.
    async fn open_emergency_task(&self, spec: EmergencyTaskSpec) -> Result<Task, AlertTaskError>;

    /// Loads a task, returning `None` when it does not exist.
    async fn load(&self, task_id: TaskId) -> Result<Option<Task>, AlertTaskError>;
}
