//! Port contracts for the task registry.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod dispatch;
pub mod settlement;
pub mod store;

pub use dispatch::{DispatchQueue, DispatchQueueError, DispatchRequest};
pub use settlement::{CompletedAssignment, CompletionSettlement, SettlementError};
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
