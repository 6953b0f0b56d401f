//! In-memory notification store for tests and single-process deployments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::dispatch::{
    domain::{DispatchNotification, NotificationId},
    ports::{NotificationStore, NotificationStoreError, NotificationStoreResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory notification store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationStore {
    state: Arc<RwLock<InMemoryNotificationState>>,
}

#[derive(Debug, Default)]
struct InMemoryNotificationState {
    notifications: HashMap<NotificationId, DispatchNotification>,
    task_index: HashMap<TaskId, Vec<NotificationId>>,
}

impl InMemoryNotificationStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn insert(&self, notification: &DispatchNotification) -> NotificationStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            NotificationStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.notifications.contains_key(&notification.id()) {
            return Err(NotificationStoreError::DuplicateNotification(
                notification.id(),
            ));
        }

        state
            .task_index
            .entry(notification.task_id())
            .or_default()
            .push(notification.id());
        state
            .notifications
            .insert(notification.id(), notification.clone());
        Ok(())
    }

    async fn update(
        &self,
        notification: &DispatchNotification,
        expected_version: u64,
    ) -> NotificationStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            NotificationStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let stored_version = state
            .notifications
            .get(&notification.id())
            .ok_or(NotificationStoreError::NotFound(notification.id()))?
            .version();
        if stored_version != expected_version {
            return Err(NotificationStoreError::VersionConflict {
                notification_id: notification.id(),
                expected: expected_version,
                actual: stored_version,
            });
        }

        // A notification never moves between tasks, so the task index
        // stays untouched on update.
        state
            .notifications
            .insert(notification.id(), notification.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        notification_id: NotificationId,
    ) -> NotificationStoreResult<Option<DispatchNotification>> {
        let state = self.state.read().map_err(|err| {
            NotificationStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.notifications.get(&notification_id).cloned())
    }

    async fn list_for_task(
        &self,
        task_id: TaskId,
    ) -> NotificationStoreResult<Vec<DispatchNotification>> {
        let state = self.state.read().map_err(|err| {
            NotificationStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .task_index
            .get(&task_id)
            .into_iter()
            .flatten()
            .filter_map(|notification_id| state.notifications.get(notification_id))
            .cloned()
            .collect())
    }

    async fn list_due(
        &self,
        now: DateTime<Utc>,
    ) -> NotificationStoreResult<Vec<DispatchNotification>> {
        let state = self.state.read().map_err(|err| {
            NotificationStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .notifications
            .values()
            .filter(|notification| notification.is_due(now))
            .cloned()
            .collect())
    }
}
