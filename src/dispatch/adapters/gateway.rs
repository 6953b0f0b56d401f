//! Task gateway backed by the task registry service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::dispatch::ports::{ClaimOutcome, TaskGateway, TaskGatewayError};
use crate::identity::domain::UserId;
use crate::task::{
    domain::{Task, TaskId},
    ports::{CompletionSettlement, DispatchQueue, TaskStore},
    services::{TaskRegistryError, TaskRegistryService},
};
use mockable::Clock;

/// Routes dispatch loads and claims through the task registry service.
#[derive(Clone)]
pub struct RegistryTaskGateway<S, Q, P, C>
where
    S: TaskStore,
    Q: DispatchQueue,
    P: CompletionSettlement,
    C: Clock + Send + Sync,
{
    registry: Arc<TaskRegistryService<S, Q, P, C>>,
}

impl<S, Q, P, C> RegistryTaskGateway<S, Q, P, C>
where
    S: TaskStore,
    Q: DispatchQueue,
    P: CompletionSettlement,
    C: Clock + Send + Sync,
{
    /// Creates a gateway over the given registry service.
    #[must_use]
    pub const fn new(registry: Arc<TaskRegistryService<S, Q, P, C>>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl<S, Q, P, C> TaskGateway for RegistryTaskGateway<S, Q, P, C>
where
    S: TaskStore,
    Q: DispatchQueue,
    P: CompletionSettlement,
    C: Clock + Send + Sync,
{
    async fn load(&self, task_id: TaskId) -> Result<Option<Task>, TaskGatewayError> {
        match self.registry.task(task_id).await {
            Ok(task) => Ok(Some(task)),
            Err(TaskRegistryError::NotFound(_)) => Ok(None),
            Err(err) => Err(TaskGatewayError::gateway(err)),
        }
    }

    async fn claim_for(
        &self,
        task_id: TaskId,
        helper: UserId,
    ) -> Result<ClaimOutcome, TaskGatewayError> {
        match self.registry.claim_task(task_id, helper).await {
            Ok(task) => Ok(ClaimOutcome::Claimed(task)),
            Err(
                TaskRegistryError::Conflict(_)
                | TaskRegistryError::InvalidState(_)
                | TaskRegistryError::Forbidden(_),
            ) => Ok(ClaimOutcome::Unavailable),
            Err(TaskRegistryError::NotFound(id)) => Err(TaskGatewayError::NotFound(id)),
            Err(err) => Err(TaskGatewayError::gateway(err)),
        }
    }
}
