//! Star ratings and the running rating average.
//!
//! Averages are held in centistars (one star = 100 centistars) so the
//! update rule stays in integer arithmetic and reproduces exactly.

use super::IdentityDomainError;
use serde::{Deserialize, Serialize};

/// A single star rating between 1 and 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingValue(u8);

impl RatingValue {
    const MIN_STARS: u8 = 1;
    const MAX_STARS: u8 = 5;

    /// Creates a validated star rating.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidRating`] when the value is not
    /// between 1 and 5.
    pub const fn new(stars: u8) -> Result<Self, IdentityDomainError> {
        if stars < Self::MIN_STARS || stars > Self::MAX_STARS {
            return Err(IdentityDomainError::InvalidRating(stars));
        }
        Ok(Self(stars))
    }

    /// Returns the rating in whole stars.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }

    /// Returns the rating in centistars.
    #[must_use]
    pub const fn centistars(self) -> u16 {
        self.0 as u16 * 100
    }
}

/// Running rating average in centistars, with the sample count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingAverage {
    centistars: u16,
    samples: u32,
}

impl RatingAverage {
    /// Creates an empty average with no samples.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            centistars: 0,
            samples: 0,
        }
    }

    /// Returns the current average in centistars (480 means 4.8 stars).
    #[must_use]
    pub const fn centistars(self) -> u16 {
        self.centistars
    }

    /// Returns how many ratings have been folded into the average.
    #[must_use]
    pub const fn samples(self) -> u32 {
        self.samples
    }

    /// Folds one rating into the running average.
    ///
    /// Uses the textbook update `(old * n + new) / (n + 1)` in 64-bit
    /// intermediates, truncating towards zero.
    #[must_use]
    #[expect(
        clippy::integer_division,
        reason = "running average truncates by definition; inputs bound the result to u16"
    )]
    pub fn with_sample(self, rating: RatingValue) -> Self {
        let weighted = u64::from(self.centistars) * u64::from(self.samples)
            + u64::from(rating.centistars());
        let next_samples = self.samples.saturating_add(1);
        let average = weighted / u64::from(next_samples);
        Self {
            centistars: u16::try_from(average).unwrap_or(u16::MAX),
            samples: next_samples,
        }
    }
}
