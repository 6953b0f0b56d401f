//! Port contracts for the dispatch engine.

pub mod candidates;
pub mod gateway;
pub mod store;

pub use candidates::{CandidateSource, CandidateSourceError};
pub use gateway::{ClaimOutcome, TaskGateway, TaskGatewayError};
pub use store::{NotificationStore, NotificationStoreError, NotificationStoreResult};
