//! HelpHub: community task and help marketplace backend.
//!
//! This crate provides the core functionality behind the HelpHub screens:
//! task lifecycle management, urgency-tiered helper dispatch, emergency
//! broadcast, and user trust accounting.
//!
//! # Architecture
//!
//! HelpHub follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (stores, queues, etc.)
//!
//! # Modules
//!
//! - [`identity`]: User records, verification, trust scores, and settlement
//! - [`task`]: Task records, the lifecycle state machine, and fair pricing
//! - [`dispatch`]: Candidate ranking, notification fan-out, and expiry
//! - [`emergency`]: Emergency alerts and responder aggregation
//! - [`geo`]: Planar city-grid coordinates shared by the other modules

pub mod dispatch;
pub mod emergency;
pub mod geo;
pub mod identity;
pub mod task;
