//! Alert task gateway backed by the task registry service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::emergency::ports::{AlertTaskError, AlertTaskGateway, EmergencyTaskSpec};
use crate::task::{
    domain::{Task, TaskId},
    ports::{CompletionSettlement, DispatchQueue, TaskStore},
    services::{CreateTaskRequest, TaskRegistryError, TaskRegistryService},
};
use mockable::Clock;

/// Opens emergency-tier tasks through the task registry service.
#[derive(Clone)]
pub struct RegistryAlertGateway<S, Q, P, C>
where
    S: TaskStore,
    Q: DispatchQueue,
    P: CompletionSettlement,
    C: Clock + Send + Sync,
{
    registry: Arc<TaskRegistryService<S, Q, P, C>>,
}

impl<S, Q, P, C> RegistryAlertGateway<S, Q, P, C>
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
impl<S, Q, P, C> AlertTaskGateway for RegistryAlertGateway<S, Q, P, C>
where
    S: TaskStore,
    Q: DispatchQueue,
    P: CompletionSettlement,
    C: Clock + Send + Sync,
{
    async fn open_emergency_task(&self, spec: EmergencyTaskSpec) -> Result<Task, AlertTaskError> {
        let request = CreateTaskRequest::new(
            spec.requester,
            spec.title,
            spec.description,
            spec.location,
            spec.address,
            spec.price_rupees,
        )
        .with_category("emergency")
        .with_urgency("emergency")
        .with_dispatch_radius(spec.radius_m);
        match self.registry.create_task(request).await {
            Ok(task) => Ok(task),
            Err(TaskRegistryError::Validation(err)) => Err(AlertTaskError::Rejected {
                reason: err.to_string(),
            }),
            Err(err) => Err(AlertTaskError::access(err)),
        }
    }

    async fn load(&self, task_id: TaskId) -> Result<Option<Task>, AlertTaskError> {
        match self.registry.task(task_id).await {
            Ok(task) => Ok(Some(task)),
            Err(TaskRegistryError::NotFound(_)) => Ok(None),
            Err(err) => Err(AlertTaskError::access(err)),
        }
    }
}
