//! Registration, verification, and trust settlement for users.

use crate::geo::GeoPoint;
use crate::identity::{
    domain::{
        Badge, CompletionCredit, IdentityDomainError, NewUserProfile, PhoneNumber, RatingValue,
        Role, User, UserId, VerificationKind,
    },
    ports::{UserStore, UserStoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Upper bound on compare-and-swap retries before giving up on a record.
const MAX_UPDATE_ATTEMPTS: usize = 8;

/// Errors surfaced by identity service operations.
#[derive(Debug, Error)]
pub enum IdentityServiceError {
    /// Profile data failed domain validation.
    #[error(transparent)]
    Validation(#[from] IdentityDomainError),
    /// No user exists for the identifier.
    #[error("user {0} not found")]
    NotFound(UserId),
    /// Another account already owns the phone number.
    #[error("phone number {0} is already registered")]
    PhoneInUse(PhoneNumber),
    /// Concurrent writers kept invalidating the update.
    #[error("user {0} was updated concurrently too many times")]
    ConcurrentUpdate(UserId),
    /// The backing store failed.
    #[error(transparent)]
    Store(UserStoreError),
}

/// Parameters for registering a new user.
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    display_name: String,
    phone: String,
    city: String,
    location: GeoPoint,
    roles: Option<Vec<Role>>,
}

impl RegisterUserRequest {
    /// Creates a registration request granting both capabilities.
    #[must_use]
    pub fn new(
        display_name: impl Into<String>,
        phone: impl Into<String>,
        city: impl Into<String>,
        location: GeoPoint,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            phone: phone.into(),
            city: city.into(),
            location,
            roles: None,
        }
    }

    /// Restricts the registration to the given capabilities.
    #[must_use]
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = Some(roles.into_iter().collect());
        self
    }
}

/// Completion credit to settle against a helper's record.
#[derive(Debug, Clone, Copy)]
pub struct SettlementRequest {
    /// Helper who completed the task.
    pub helper: UserId,
    /// Price paid for the task, in rupees.
    pub price_rupees: u64,
    /// Whether the task was emergency tier.
    pub emergency: bool,
    /// Whether the helper claimed within the fast-claim window.
    pub fast_claim: bool,
}

/// Coordinates user registration, verification, and trust settlement.
pub struct IdentityService<S, C>
where
    S: UserStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> IdentityService<S, C>
where
    S: UserStore,
    C: Clock + Send + Sync,
{
    /// Creates a service backed by the given store and clock.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Validation`] for malformed profile
    /// data and [`IdentityServiceError::PhoneInUse`] when the phone number
    /// is already registered.
    pub async fn register(&self, request: RegisterUserRequest) -> Result<User, IdentityServiceError> {
        let mut profile = NewUserProfile::new(
            request.display_name,
            request.phone,
            request.city,
            request.location,
        )?;
        if let Some(roles) = request.roles {
            profile = profile.with_roles(roles);
        }
        let user = User::register(profile, &*self.clock);
        match self.store.insert(&user).await {
            Ok(()) => Ok(user),
            Err(UserStoreError::DuplicatePhone(phone)) => {
                Err(IdentityServiceError::PhoneInUse(phone))
            }
            Err(err) => Err(IdentityServiceError::Store(err)),
        }
    }

    /// Marks a verification check as passed and returns the updated user.
    ///
    /// Marking an already-passed check is a no-op that returns the current
    /// record unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::NotFound`] when the user does not
    /// exist.
    pub async fn mark_verified(
        &self,
        user_id: UserId,
        kind: VerificationKind,
    ) -> Result<User, IdentityServiceError> {
        let clock = Arc::clone(&self.clock);
        self.mutate(user_id, move |user| user.mark_verified(kind, &*clock))
            .await
    }

    /// Fetches a user's profile.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::NotFound`] when the user does not
    /// exist.
    pub async fn profile(&self, user_id: UserId) -> Result<User, IdentityServiceError> {
        self.find_or_error(user_id).await
    }

    /// Lists the badges a user has earned.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::NotFound`] when the user does not
    /// exist.
    pub async fn badges(&self, user_id: UserId) -> Result<Vec<Badge>, IdentityServiceError> {
        Ok(self.find_or_error(user_id).await?.badges())
    }

    /// Credits a completed task to a helper's earnings and statistics.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::NotFound`] when the helper does not
    /// exist.
    pub async fn settle_completion(
        &self,
        request: SettlementRequest,
    ) -> Result<User, IdentityServiceError> {
        let credit = CompletionCredit {
            price_rupees: request.price_rupees,
            emergency: request.emergency,
            fast_claim: request.fast_claim,
        };
        let clock = Arc::clone(&self.clock);
        self.mutate(request.helper, move |user| {
            user.record_completion(credit, &*clock);
            true
        })
        .await
    }

    /// Folds a poster rating into a helper's running average.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::NotFound`] when the helper does not
    /// exist.
    pub async fn apply_rating(
        &self,
        helper: UserId,
        rating: RatingValue,
    ) -> Result<User, IdentityServiceError> {
        let clock = Arc::clone(&self.clock);
        self.mutate(helper, move |user| {
            user.record_rating(rating, &*clock);
            true
        })
        .await
    }

    /// Reloads, mutates, and conditionally writes back a user record.
    ///
    /// `apply` returns whether the record changed; unchanged records are
    /// returned without a write. Version conflicts trigger a reload and
    /// retry up to [`MAX_UPDATE_ATTEMPTS`] times.
    async fn mutate<F>(&self, user_id: UserId, mut apply: F) -> Result<User, IdentityServiceError>
    where
        F: FnMut(&mut User) -> bool,
    {
        for _ in 0..MAX_UPDATE_ATTEMPTS {
            let mut user = self.find_or_error(user_id).await?;
            let expected = user.version();
            if !apply(&mut user) {
                return Ok(user);
            }
            match self.store.update(&user, expected).await {
                Ok(()) => return Ok(user),
                Err(UserStoreError::VersionConflict { .. }) => {}
                Err(err) => return Err(IdentityServiceError::Store(err)),
            }
        }
        Err(IdentityServiceError::ConcurrentUpdate(user_id))
    }

    async fn find_or_error(&self, user_id: UserId) -> Result<User, IdentityServiceError> {
        self.store
            .find_by_id(user_id)
            .await
            .map_err(IdentityServiceError::Store)?
            .ok_or(IdentityServiceError::NotFound(user_id))
    }
}
