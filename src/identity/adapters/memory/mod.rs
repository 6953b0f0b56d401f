//! In-memory adapters backing the identity ports.

mod user;

pub use user::InMemoryUserStore;
