//! Adapter implementations for dispatch ports.
//!
//! - [`memory::InMemoryNotificationStore`] keeps notifications in process
//!   memory.
//! - [`directory::UserDirectorySource`] feeds helper profiles from the
//!   identity directory.
//! - [`gateway::RegistryTaskGateway`] routes loads and claims through the
//!   task registry service.

pub mod directory;
pub mod gateway;
pub mod memory;

pub use directory::UserDirectorySource;
pub use gateway::RegistryTaskGateway;
