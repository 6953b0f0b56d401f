//! Adapter implementations for task registry ports.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryTaskStore`]: Thread-safe in-memory storage for unit
//!   testing and single-process deployments
//! - [`queue::ChannelDispatchQueue`]: Dispatch queue backed by an unbounded
//!   tokio channel
//! - [`settlement::TrustSettlement`]: Settlement bridge crediting helpers
//!   through the identity service

pub mod memory;
pub mod queue;
pub mod settlement;

pub use queue::ChannelDispatchQueue;
pub use settlement::TrustSettlement;
