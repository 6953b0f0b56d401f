//! Identity and trust accounting for HelpHub.
//!
//! This module owns user records: registration with a validated phone
//! number, independent verification flags, the derived trust score, badge
//! derivation, and post-completion settlement of earnings and ratings. The
//! module follows hexagonal architecture:
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
