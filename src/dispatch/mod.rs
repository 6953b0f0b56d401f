//! Dispatch and matching engine for HelpHub.
//!
//! This module turns an open task into ranked helper notifications. It
//! selects verified helpers inside the task's search radius, scores them on
//! proximity and trust, fans out to the best few, and records accept or
//! decline replies. An accept routes back into the task registry claim path,
//! so the registry's optimistic concurrency still decides the single winner.
//! The module follows hexagonal architecture:
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
