//! In-memory user store for tests and single-process deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{PhoneNumber, Role, User, UserId},
    ports::{UserStore, UserStoreError, UserStoreResult},
};

/// Thread-safe in-memory user store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    phone_index: HashMap<String, UserId>,
}

impl InMemoryUserStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: &User) -> UserStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| UserStoreError::persistence(std::io::Error::other(err.to_string())))?;
        if state.users.contains_key(&user.id()) {
            return Err(UserStoreError::DuplicateUser(user.id()));
        }
        let phone_key = user.phone().as_str().to_owned();
        if state.phone_index.contains_key(&phone_key) {
            return Err(UserStoreError::DuplicatePhone(user.phone().clone()));
        }

        state.phone_index.insert(phone_key, user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User, expected_version: u64) -> UserStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| UserStoreError::persistence(std::io::Error::other(err.to_string())))?;

        let stored_version = state
            .users
            .get(&user.id())
            .ok_or(UserStoreError::NotFound(user.id()))?
            .version();
        if stored_version != expected_version {
            return Err(UserStoreError::VersionConflict {
                user_id: user.id(),
                expected: expected_version,
                actual: stored_version,
            });
        }

        // Phone numbers are immutable after registration, so the phone
        // index never needs rebuilding here.
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: UserId) -> UserStoreResult<Option<User>> {
        let state = self
            .state
            .read()
            .map_err(|err| UserStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.users.get(&user_id).cloned())
    }

    async fn find_by_phone(&self, phone: &PhoneNumber) -> UserStoreResult<Option<User>> {
        let state = self
            .state
            .read()
            .map_err(|err| UserStoreError::persistence(std::io::Error::other(err.to_string())))?;
        let user = state
            .phone_index
            .get(phone.as_str())
            .and_then(|user_id| state.users.get(user_id))
            .cloned();
        Ok(user)
    }

    async fn list_helpers(&self) -> UserStoreResult<Vec<User>> {
        let state = self
            .state
            .read()
            .map_err(|err| UserStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state
            .users
            .values()
            .filter(|user| user.has_role(Role::Helper))
            .cloned()
            .collect())
    }
}
