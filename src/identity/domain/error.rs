//! Error types for identity domain validation.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The display name is empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,

    /// The city is empty after trimming.
    #[error("city must not be empty")]
    EmptyCity,

    /// The phone number does not follow the expected format.
    #[error("invalid phone number '{0}', expected a leading + and 8 to 15 digits")]
    InvalidPhone(String),

    /// The star rating is outside the accepted range.
    #[error("rating must be between 1 and 5 stars, got {0}")]
    InvalidRating(u8),
}
