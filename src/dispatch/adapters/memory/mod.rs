//! In-memory adapters for dispatch ports.

mod notification;

pub use notification::InMemoryNotificationStore;
