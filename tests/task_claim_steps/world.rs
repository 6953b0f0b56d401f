//! Shared world state for task claim BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use helphub::identity::adapters::memory::InMemoryUserStore;
use helphub::identity::domain::UserId;
use helphub::identity::services::IdentityService;
use helphub::task::{
    adapters::memory::InMemoryTaskStore,
    adapters::{ChannelDispatchQueue, TrustSettlement},
    domain::Task,
    ports::DispatchRequest,
    services::{TaskRegistryError, TaskRegistryService},
};
use mockable::DefaultClock;
use rstest::fixture;
use tokio::sync::mpsc::UnboundedReceiver;

/// Registry service type used by the BDD world.
pub type TestRegistry = TaskRegistryService<
    InMemoryTaskStore,
    ChannelDispatchQueue,
    TrustSettlement<InMemoryUserStore, DefaultClock>,
    DefaultClock,
>;

/// Scenario world for task claim behaviour tests.
pub struct TaskClaimWorld {
    /// The registry service under test.
    pub registry: TestRegistry,
    /// Task the scenario revolves around.
    pub task: Option<Task>,
    /// Result of the most recent claim attempt.
    pub last_claim_result: Option<Result<Task, TaskRegistryError>>,
    /// Helper identities keyed by scenario name.
    helpers: HashMap<String, UserId>,
    /// Keeps the dispatch queue open for the scenario's lifetime.
    _requests: UnboundedReceiver<DispatchRequest>,
}

impl TaskClaimWorld {
    /// Creates a world with a freshly wired registry.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let users = Arc::new(InMemoryUserStore::new());
        let identity = Arc::new(IdentityService::new(users, Arc::clone(&clock)));
        let (queue, requests) = ChannelDispatchQueue::channel();
        let registry = TaskRegistryService::new(
            Arc::new(InMemoryTaskStore::new()),
            Arc::new(queue),
            Arc::new(TrustSettlement::new(identity)),
            clock,
        );

        Self {
            registry,
            task: None,
            last_claim_result: None,
            helpers: HashMap::new(),
            _requests: requests,
        }
    }

    /// Returns the stable identity behind a scenario helper name.
    pub fn helper(&mut self, name: &str) -> UserId {
        *self
            .helpers
            .entry(name.to_owned())
            .or_insert_with(UserId::new)
    }

    /// Looks up a helper the scenario has already introduced.
    ///
    /// # Errors
    ///
    /// Returns an error when the name has no identity yet.
    pub fn helper_named(&self, name: &str) -> Result<UserId, eyre::Report> {
        self.helpers
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown scenario helper '{name}'"))
    }

    /// Returns the scenario task's identifier.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task_id(&self) -> Result<helphub::task::domain::TaskId, eyre::Report> {
        self.task
            .as_ref()
            .map(Task::id)
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for TaskClaimWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskClaimWorld {
    TaskClaimWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
