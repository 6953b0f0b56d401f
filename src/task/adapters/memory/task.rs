//! In-memory task store for tests and single-process deployments.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    open_index: HashSet<TaskId>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn index_status(state: &mut InMemoryTaskState, task: &Task) {
    if task.status() == TaskStatus::Open {
        state.open_index.insert(task.id());
    } else {
        state.open_index.remove(&task.id());
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskStoreError::DuplicateTask(task.id()));
        }

        index_status(&mut state, task);
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task, expected_version: u64) -> TaskStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;

        let stored_version = state
            .tasks
            .get(&task.id())
            .ok_or(TaskStoreError::NotFound(task.id()))?
            .version();
        if stored_version != expected_version {
            return Err(TaskStoreError::VersionConflict {
                task_id: task.id(),
                expected: expected_version,
                actual: stored_version,
            });
        }

        index_status(&mut state, task);
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, task_id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.tasks.get(&task_id).cloned())
    }

    async fn list_open(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state
            .open_index
            .iter()
            .filter_map(|task_id| state.tasks.get(task_id))
            .cloned()
            .collect())
    }
}
