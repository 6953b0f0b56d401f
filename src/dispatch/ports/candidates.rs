//! Source of helper profiles the engine can dispatch to.

use crate::dispatch::domain::HelperProfile;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced while looking up helper profiles.
#[derive(Debug, Clone, Error)]
pub enum CandidateSourceError {
    /// The profile lookup failed.
    #[error("helper profile lookup failed: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl CandidateSourceError {
    /// Wraps an arbitrary error as a lookup failure.
    #[must_use]
    pub fn lookup(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(error))
    }
}

/// Port for fetching the helpers eligible for dispatch.
///
/// Implementations return every registered helper; the engine filters by
/// verification, radius, and poster identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Returns profiles for every registered helper.
    async fn helper_profiles(&self) -> Result<Vec<HelperProfile>, CandidateSourceError>;
}
