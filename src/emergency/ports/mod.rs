//! Port contracts for emergency broadcast.

pub mod gateway;
pub mod store;

pub use gateway::{AlertTaskError, AlertTaskGateway, EmergencyTaskSpec};
pub use store::{AlertStore, AlertStoreError, AlertStoreResult};
