//! Settlement bridge crediting helpers through the identity service.

use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;

use crate::identity::{
    domain::{RatingValue, UserId},
    ports::UserStore,
    services::{IdentityService, IdentityServiceError, SettlementRequest},
};
use crate::task::ports::{CompletedAssignment, CompletionSettlement, SettlementError};

/// Settles completed tasks against the identity service.
pub struct TrustSettlement<S, C>
where
    S: UserStore,
    C: Clock + Send + Sync,
{
    identity: Arc<IdentityService<S, C>>,
}

impl<S, C> TrustSettlement<S, C>
where
    S: UserStore,
    C: Clock + Send + Sync,
{
    /// Creates a settlement adapter over the given identity service.
    #[must_use]
    pub const fn new(identity: Arc<IdentityService<S, C>>) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl<S, C> CompletionSettlement for TrustSettlement<S, C>
where
    S: UserStore,
    C: Clock + Send + Sync,
{
    async fn settle(&self, assignment: &CompletedAssignment) -> Result<(), SettlementError> {
        self.identity
            .settle_completion(SettlementRequest {
                helper: assignment.helper,
                price_rupees: assignment.price_rupees,
                emergency: assignment.emergency,
                fast_claim: assignment.fast_claim,
            })
            .await
            .map(|_| ())
            .map_err(map_identity_error)
    }

    async fn apply_rating(
        &self,
        helper: UserId,
        rating: RatingValue,
    ) -> Result<(), SettlementError> {
        self.identity
            .apply_rating(helper, rating)
            .await
            .map(|_| ())
            .map_err(map_identity_error)
    }
}

fn map_identity_error(err: IdentityServiceError) -> SettlementError {
    match err {
        IdentityServiceError::NotFound(user_id) => SettlementError::UnknownHelper(user_id),
        other => SettlementError::failed(other),
    }
}
