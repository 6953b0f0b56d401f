//! Emergency broadcast for HelpHub.
//!
//! Raising an alert opens a pre-filled emergency task through the task
//! registry, records the alert alongside it, and relies on the dispatch
//! engine's emergency tier for the widest fan-out. The module then
//! projects dispatch notifications into alert status and responder
//! summaries with arrival estimates. The module follows hexagonal
//! architecture:
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
