//! In-memory adapters for emergency ports.

mod alert;

pub use alert::InMemoryAlertStore;
