//! Outbound port for settling completed tasks against helper records.

use crate::identity::domain::{RatingValue, UserId};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Snapshot of a completed assignment handed to settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedAssignment {
    /// Helper who fulfilled the task.
    pub helper: UserId,
    /// Task that was completed.
    pub task_id: TaskId,
    /// Price credited to the helper's earnings, in rupees.
    pub price_rupees: u64,
    /// Whether the task was emergency tier.
    pub emergency: bool,
    /// Whether the helper claimed within the fast-claim window.
    pub fast_claim: bool,
}

/// Errors surfaced by settlement implementations.
#[derive(Debug, Clone, Error)]
pub enum SettlementError {
    /// The helper has no identity record.
    #[error("helper {0} has no identity record")]
    UnknownHelper(UserId),
    /// The settlement backend failed.
    #[error("settlement failed: {0}")]
    Failed(Arc<dyn std::error::Error + Send + Sync>),
}

impl SettlementError {
    /// Wraps an arbitrary error as a settlement failure.
    #[must_use]
    pub fn failed(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Failed(Arc::new(error))
    }
}

/// Port for crediting helpers after completion and ratings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionSettlement: Send + Sync {
    /// Credits a completed assignment to the helper's record.
    async fn settle(&self, assignment: &CompletedAssignment) -> Result<(), SettlementError>;

    /// Folds a poster rating into the helper's record.
    async fn apply_rating(&self, helper: UserId, rating: RatingValue)
    -> Result<(), SettlementError>;
}
