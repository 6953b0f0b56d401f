//! Task registry for HelpHub.
//!
//! This module owns the task lifecycle: posting a task, claiming it,
//! starting work, withdrawing, submitting completion proof, and rating the
//! helper afterwards. Transitions are enforced by the domain state machine
//! and persisted with optimistic concurrency so racing claims resolve to
//! exactly one winner. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
