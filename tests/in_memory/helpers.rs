//! Shared test helpers wiring the in-memory service stack.

use helphub::dispatch::adapters::{RegistryTaskGateway, UserDirectorySource};
use helphub::dispatch::adapters::memory::InMemoryNotificationStore;
use helphub::dispatch::services::DispatchEngine;
use helphub::emergency::adapters::RegistryAlertGateway;
use helphub::emergency::adapters::memory::InMemoryAlertStore;
use helphub::emergency::services::EmergencyBroadcastService;
use helphub::geo::GeoPoint;
use helphub::identity::adapters::memory::InMemoryUserStore;
use helphub::identity::domain::{UserId, VerificationKind};
use helphub::identity::services::{IdentityService, RegisterUserRequest};
use helphub::task::adapters::memory::InMemoryTaskStore;
use helphub::task::adapters::{ChannelDispatchQueue, TrustSettlement};
use helphub::task::ports::DispatchRequest;
use helphub::task::services::{CreateTaskRequest, TaskRegistryService};
use mockable::DefaultClock;
use rstest::fixture;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::UnboundedReceiver;

/// Identity service over the in-memory user store.
pub type Identity = IdentityService<InMemoryUserStore, DefaultClock>;

/// Task registry wired to the channel queue and trust settlement.
pub type Registry = TaskRegistryService<
    InMemoryTaskStore,
    ChannelDispatchQueue,
    TrustSettlement<InMemoryUserStore, DefaultClock>,
    DefaultClock,
>;

/// Dispatch engine over the in-memory stores and the registry gateway.
pub type Engine = DispatchEngine<
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
pub type Emergency = EmergencyBroadcastService<
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

/// Fully wired in-memory service stack.
///
/// Tasks created through `registry` land on `requests`, where a test can
/// hand them to `engine` the way the dispatch worker would.
pub struct Stack {
    /// Identity service shared by settlement and the helper directory.
    pub identity: Arc<Identity>,
    /// Task registry service.
    pub registry: Arc<Registry>,
    /// Dispatch engine.
    pub engine: Arc<Engine>,
    /// Emergency broadcast service.
    pub emergency: Emergency,
    /// Receiver for dispatch requests enqueued by the registry.
    pub requests: UnboundedReceiver<DispatchRequest>,
}

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a freshly wired service stack for each test.
#[fixture]
pub fn stack() -> Stack {
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

    Stack {
        identity,
        registry,
        engine,
        emergency,
        requests,
    }
}

/// Registers a phone-verified helper at the given location.
///
/// # Errors
///
/// Returns an error if registration or verification fails.
pub fn register_verified_helper(
    rt: &Runtime,
    identity: &Identity,
    name: &str,
    phone: &str,
    location: GeoPoint,
) -> Result<UserId, Box<dyn std::error::Error + Send + Sync>> {
    let user = rt.block_on(identity.register(RegisterUserRequest::new(
        name, phone, "Bengaluru", location,
    )))?;
    rt.block_on(identity.mark_verified(user.id(), VerificationKind::Phone))?;
    Ok(user.id())
}

/// Builds a plain grocery-run request posted from the origin.
pub fn grocery_request(poster: UserId) -> CreateTaskRequest {
    CreateTaskRequest::new(
        poster,
        "Pick up groceries",
        "Two bags from the market on MG Road",
        GeoPoint::new(0, 0),
        "12 MG Road, Indiranagar",
        150,
    )
    .with_category("groceries")
}
