//! Candidate source backed by the identity user directory.

use async_trait::async_trait;
use std::sync::Arc;

use crate::dispatch::{
    domain::HelperProfile,
    ports::{CandidateSource, CandidateSourceError},
};
use crate::identity::domain::VerificationKind;
use crate::identity::ports::UserStore;

/// Feeds helper profiles from the identity user store.
#[derive(Debug, Clone)]
pub struct UserDirectorySource<S>
where
    S: UserStore,
{
    store: Arc<S>,
}

impl<S> UserDirectorySource<S>
where
    S: UserStore,
{
    /// Creates a candidate source over the given user store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> CandidateSource for UserDirectorySource<S>
where
    S: UserStore,
{
    async fn helper_profiles(&self) -> Result<Vec<HelperProfile>, CandidateSourceError> {
        let helpers = self
            .store
            .list_helpers()
            .await
            .map_err(CandidateSourceError::lookup)?;
        Ok(helpers
            .into_iter()
            .map(|user| HelperProfile {
                user_id: user.id(),
                location: user.location(),
                trust_score: user.trust_score(),
                phone_verified: user.verification().is_verified(VerificationKind::Phone),
            })
            .collect())
    }
}
