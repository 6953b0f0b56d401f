//! Port abstractions for identity persistence.

mod store;

pub use store::{UserStore, UserStoreError, UserStoreResult};
