//! Shared world state for emergency broadcast scenarios.

use std::sync::Arc;

use eyre::WrapErr;
use helphub::dispatch::adapters::memory::InMemoryNotificationStore;
use helphub::dispatch::adapters::{RegistryTaskGateway, UserDirectorySource};
use helphub::dispatch::domain::DispatchNotification;
use helphub::dispatch::services::DispatchEngine;
use helphub::emergency::adapters::RegistryAlertGateway;
use helphub::emergency::adapters::memory::InMemoryAlertStore;
use helphub::emergency::domain::{EmergencyAlert, EmergencyKind};
use helphub::emergency::services::{CreateAlertRequest, EmergencyBroadcastService};
use helphub::geo::GeoPoint;
use helphub::identity::adapters::memory::InMemoryUserStore;
use helphub::identity::domain::UserId;
use helphub::identity::services::IdentityService;
use helphub::task::adapters::memory::InMemoryTaskStore;
use helphub::task::adapters::{ChannelDispatchQueue, TrustSettlement};
use helphub::task::ports::DispatchRequest;
use helphub::task::services::TaskRegistryService;
use mockable::DefaultClock;
use rstest::fixture;
use tokio::sync::mpsc::UnboundedReceiver;

/// Identity service over the in-memory user store.
pub type TestIdentity = IdentityService<InMemoryUserStore, DefaultClock>;

/// Task registry wired to the channel queue and trust settlement.
pub type TestRegistry = TaskRegistryService<
    InMemoryTaskStore,
    ChannelDispatchQueue,
    TrustSettlement<InMemoryUserStore, DefaultClock>,
    DefaultClock,
>;

/// Dispatch engine over the in-memory stores and the registry gateway.
pub type TestEngine = DispatchEngine<
    InMemoryNotificationStore,
    UserDirectorySource<InMemoryUserStore>,
    RegistryTaskGateway<
        InMemoryTaskStore,
        ChannelDispatchQueue,
        TrustSettlement<InMemoryUserStore, DefaultClock>,
        DefaultClock,
    >,
    DefaultClock,
>;

/// Emergency broadcast service over the same stores.
pub type TestEmergency = EmergencyBroadcastService<
    RegistryAlertGateway<
        InMemoryTaskStore,
        ChannelDispatchQueue,
        TrustSettlement<InMemoryUserStore, DefaultClock>,
        DefaultClock,
    >,
    InMemoryAlertStore,
    InMemoryNotificationStore,
    UserDirectorySource<InMemoryUserStore>,
    DefaultClock,
>;

/// Test world carrying the wired services and scenario state.
pub struct EmergencyWorld {
    /// Identity service used to register helpers.
    pub identity: Arc<TestIdentity>,
    /// Task registry backing the alert's task.
    pub registry: Arc<TestRegistry>,
    /// Dispatch engine running the broadcast rounds.
    pub engine: Arc<TestEngine>,
    /// Emergency broadcast service under test.
    pub emergency: TestEmergency,
    /// Receiver for dispatch requests enqueued by the registry.
    pub requests: UnboundedReceiver<DispatchRequest>,
    /// Helper registered by the background steps.
    pub helper: Option<UserId>,
    /// Alert raised during the scenario.
    pub alert: Option<EmergencyAlert>,
    /// Notifications sent by the last dispatch round.
    pub notifications: Vec<DispatchNotification>,
}

impl EmergencyWorld {
    /// Creates a world with a freshly wired in-memory stack.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let users = Arc::new(InMemoryUserStore::new());
        let identity = Arc::new(IdentityService::new(Arc::clone(&users), Arc::clone(&clock)));

        let (queue, requests) = ChannelDispatchQueue::channel();
        let registry = Arc::new(TaskRegistryService::new(
            Arc::new(InMemoryTaskStore::new()),
            Arc::new(queue),
            Arc::new(TrustSettlement::new(Arc::clone(&identity))),
            Arc::clone(&clock),
        ));

        let notifications = Arc::new(InMemoryNotificationStore::new());
        let directory = Arc::new(UserDirectorySource::new(Arc::clone(&users)));
        let engine = Arc::new(DispatchEngine::new(
            Arc::clone(&notifications),
            Arc::clone(&directory),
            Arc::new(RegistryTaskGateway::new(Arc::clone(&registry))),
            Arc::clone(&clock),
        ));

        let emergency = EmergencyBroadcastService::new(
            Arc::new(RegistryAlertGateway::new(Arc::clone(&registry))),
            Arc::new(InMemoryAlertStore::new()),
            notifications,
            directory,
            clock,
        );

        Self {
            identity,
            registry,
            engine,
            emergency,
            requests,
            helper: None,
            alert: None,
            notifications: Vec::new(),
        }
    }

    /// Returns the alert raised earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if no alert has been raised yet.
    pub fn raised_alert(&self) -> Result<&EmergencyAlert, eyre::Report> {
        self.alert
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no alert raised yet"))
    }
}

impl Default for EmergencyWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Provides a fresh world for each scenario.
#[fixture]
pub fn world() -> EmergencyWorld {
    EmergencyWorld::new()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Raises a medical emergency from the given address.
///
/// # Errors
///
/// Returns an error if the broadcast service rejects the report.
pub fn raise_medical(world: &mut EmergencyWorld, address: &str) -> Result<(), eyre::Report> {
    let request = CreateAlertRequest::new(
        UserId::new(),
        EmergencyKind::Medical,
        GeoPoint::new(0, 0),
        address,
        "+91 98450 99999",
    );
    let alert = run_async(world.emergency.create_alert(request))
        .wrap_err("raising the medical emergency")?;
    world.alert = Some(alert);
    Ok(())
}
