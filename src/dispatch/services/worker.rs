//! Queue consumer that drives the dispatch engine.

use std::sync::Arc;

use crate::dispatch::ports::{CandidateSource, NotificationStore, TaskGateway};
use crate::dispatch::services::DispatchEngine;
use crate::task::ports::DispatchRequest;
use mockable::Clock;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Consumes dispatch requests from the registry's queue.
///
/// The worker drains the channel until every sender is dropped, so
/// shutting down the registry side ends the worker.
pub struct DispatchWorker<N, D, G, C>
where
    N: NotificationStore,
    D: CandidateSource,
    G: TaskGateway,
    C: Clock + Send + Sync,
{
    engine: Arc<DispatchEngine<N, D, G, C>>,
    requests: mpsc::UnboundedReceiver<DispatchRequest>,
}

impl<N, D, G, C> DispatchWorker<N, D, G, C>
where
    N: NotificationStore,
    D: CandidateSource,
    G: TaskGateway,
    C: Clock + Send + Sync,
{
    /// Creates a worker over an engine and the queue's receiving half.
    #[must_use]
    pub const fn new(
        engine: Arc<DispatchEngine<N, D, G, C>>,
        requests: mpsc::UnboundedReceiver<DispatchRequest>,
    ) -> Self {
        Self { engine, requests }
    }

    /// Processes requests until the queue closes.
    pub async fn run(mut self) {
        info!("dispatch worker started");
        while let Some(request) = self.requests.recv().await {
            match self.engine.dispatch(request).await {
                Ok(outcome) => info!(
                    task_id = %outcome.task_id,
                    notified = outcome.notifications.len(),
                    "dispatched task"
                ),
                Err(err) => warn!(
                    task_id = %request.task_id(),
                    error = %err,
                    "dispatch failed"
                ),
            }
        }
        info!("dispatch queue closed; worker stopped");
    }
}
