//! Persistence port for dispatch notifications.

use crate::dispatch::domain::{DispatchNotification, NotificationId};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Convenient result alias for notification store operations.
pub type NotificationStoreResult<T> = Result<T, NotificationStoreError>;

/// Errors surfaced by notification store implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationStoreError {
    /// A record with the same identifier already exists.
    #[error("notification {0} already exists")]
    DuplicateNotification(NotificationId),
    /// No record exists for the identifier.
    #[error("notification {0} not found")]
    NotFound(NotificationId),
    /// The stored version no longer matches the caller's snapshot.
    #[error("notification {notification_id} version mismatch: expected {expected}, found {actual}")]
    VersionConflict {
        /// Identifier of the contested record.
        notification_id: NotificationId,
        /// Version the caller read before mutating.
        expected: u64,
        /// Version currently persisted.
        actual: u64,
    },
    /// Underlying persistence failure.
    #[error("persistence failure: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationStoreError {
    /// Wraps an arbitrary error as a persistence failure.
    #[must_use]
    pub fn persistence(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(error))
    }
}

/// Port for persisting dispatch notifications.
///
/// `update` performs a compare-and-swap on the record version so a reply
/// and the expiry sweeper cannot both resolve the same notification.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Inserts a freshly sent notification.
    async fn insert(&self, notification: &DispatchNotification) -> NotificationStoreResult<()>;

    /// Replaces a stored record if its version still matches `expected_version`.
    async fn update(
        &self,
        notification: &DispatchNotification,
        expected_version: u64,
    ) -> NotificationStoreResult<()>;

    /// Fetches a notification by identifier.
    async fn find_by_id(
        &self,
        notification_id: NotificationId,
    ) -> NotificationStoreResult<Option<DispatchNotification>>;

    /// Lists every notification sent for a task, oldest first.
    async fn list_for_task(
        &self,
        task_id: TaskId,
    ) -> NotificationStoreResult<Vec<DispatchNotification>>;

    /// Lists pending notifications whose deadline has passed.
    async fn list_due(
        &self,
        now: DateTime<Utc>,
    ) -> NotificationStoreResult<Vec<DispatchNotification>>;
}
