//! Identifier and validated scalar types for the identity domain.

use super::IdentityDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a registered user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for UserId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized phone number with a leading `+` country prefix.
///
/// Spaces and dashes in the input are tolerated and stripped; the stored
/// form is `+` followed by 8 to 15 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MIN_DIGITS: usize = 8;
    const MAX_DIGITS: usize = 15;

    /// Creates a validated, normalized phone number.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidPhone`] when the value lacks a
    /// leading `+`, contains characters other than digits, spaces, and
    /// dashes, or has a digit count outside 8 to 15.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let Some(body) = trimmed.strip_prefix('+') else {
            return Err(IdentityDomainError::InvalidPhone(raw));
        };

        let mut digits = String::with_capacity(body.len());
        for ch in body.chars() {
            if ch.is_ascii_digit() {
                digits.push(ch);
            } else if ch != ' ' && ch != '-' {
                return Err(IdentityDomainError::InvalidPhone(raw));
            }
        }

        if digits.len() < Self::MIN_DIGITS || digits.len() > Self::MAX_DIGITS {
            return Err(IdentityDomainError::InvalidPhone(raw));
        }

        Ok(Self(format!("+{digits}")))
    }

    /// Returns the normalized phone number as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
