//! Orchestration services for the dispatch engine.

mod engine;
mod sweeper;
mod worker;

pub use engine::{DispatchEngine, DispatchError, DispatchOutcome, ResponseOutcome};
pub use sweeper::NotificationSweeper;
pub use worker::DispatchWorker;
