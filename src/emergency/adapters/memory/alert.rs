//! In-memory alert store for tests and single-process deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::emergency::{
    domain::EmergencyAlert,
    ports::{AlertStore, AlertStoreError, AlertStoreResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory alert store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAlertStore {
    state: Arc<RwLock<InMemoryAlertState>>,
}

#[derive(Debug, Default)]
struct InMemoryAlertState {
    alerts: HashMap<TaskId, EmergencyAlert>,
}

impl InMemoryAlertStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlertStore for InMemoryAlertStore {
    async fn insert(&self, alert: &EmergencyAlert) -> AlertStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| AlertStoreError::persistence(std::io::Error::other(err.to_string())))?;
        if state.alerts.contains_key(&alert.task_id()) {
            return Err(AlertStoreError::DuplicateAlert(alert.task_id()));
        }

        state.alerts.insert(alert.task_id(), alert.clone());
        Ok(())
    }

    async fn find_by_task(&self, task_id: TaskId) -> AlertStoreResult<Option<EmergencyAlert>> {
        let state = self
            .state
            .read()
            .map_err(|err| AlertStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.alerts.get(&task_id).cloned())
    }
}
