//! Persistence port for user records.

use crate::identity::domain::{PhoneNumber, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Convenient result alias for user store operations.
pub type UserStoreResult<T> = Result<T, UserStoreError>;

/// Errors surfaced by user store implementations.
#[derive(Debug, Clone, Error)]
pub enum UserStoreError {
    /// A record with the same identifier already exists.
    #[error("user {0} already exists")]
    DuplicateUser(UserId),
    /// Another record already owns the phone number.
    #[error("phone number {0} is already registered")]
    DuplicatePhone(PhoneNumber),
    /// No record exists for the identifier.
    #[error("user {0} not found")]
    NotFound(UserId),
    /// The stored version no longer matches the caller's snapshot.
    #[error("user {user_id} version mismatch: expected {expected}, found {actual}")]
    VersionConflict {
        /// Identifier of the contested record.
        user_id: UserId,
        /// Version the caller read before mutating.
        expected: u64,
        /// Version currently persisted.
        actual: u64,
    },
    /// Underlying persistence failure.
    #[error("persistence failure: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserStoreError {
    /// Wraps an arbitrary error as a persistence failure.
    #[must_use]
    pub fn persistence(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(error))
    }
}

/// Port for persisting user records.
///
/// `update` performs a compare-and-swap on the record version so that
/// concurrent mutations of the same user surface as
/// [`UserStoreError::VersionConflict`] instead of silently overwriting
/// each other.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a newly registered user.
    async fn insert(&self, user: &User) -> UserStoreResult<()>;

    /// Replaces a stored record if its version still matches `expected_version`.
    async fn update(&self, user: &User, expected_version: u64) -> UserStoreResult<()>;

    /// Fetches a user by identifier.
    async fn find_by_id(&self, user_id: UserId) -> UserStoreResult<Option<User>>;

    /// Fetches a user by normalized phone number.
    async fn find_by_phone(&self, phone: &PhoneNumber) -> UserStoreResult<Option<User>>;

    /// Lists every user holding the helper capability.
    async fn list_helpers(&self) -> UserStoreResult<Vec<User>>;
}
