//! Adapter implementations for emergency ports.
//!
//! - [`memory::InMemoryAlertStore`] keeps alerts in process memory.
//! - [`gateway::RegistryAlertGateway`] opens the backing emergency task
//!   through the task registry service.

pub mod gateway;
pub mod memory;

pub use gateway::RegistryAlertGateway;
