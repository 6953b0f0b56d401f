//! Suggested pricing for tasks.

use super::Urgency;
use serde::{Deserialize, Serialize};

/// Flat fare every task starts from, in rupees.
pub const BASE_FARE_RUPEES: u64 = 80;

/// Fare added per whole kilometre of distance, in rupees.
pub const PER_KM_RUPEES: u64 = 20;

/// Returns the urgency bonus added on top of base fare and distance.
#[must_use]
pub const fn urgency_bonus_rupees(urgency: Urgency) -> u64 {
    match urgency {
        Urgency::Normal => 0,
        Urgency::Urgent => 30,
        Urgency::Emergency => 70,
    }
}

/// Breakdown of a suggested task price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    base_rupees: u64,
    distance_fee_rupees: u64,
    urgency_bonus_rupees: u64,
}

impl PriceQuote {
    /// Returns the flat base fare component.
    #[must_use]
    pub const fn base_rupees(self) -> u64 {
        self.base_rupees
    }

    /// Returns the distance fee component.
    #[must_use]
    pub const fn distance_fee_rupees(self) -> u64 {
        self.distance_fee_rupees
    }

    /// Returns the urgency bonus component.
    #[must_use]
    pub const fn urgency_bonus_rupees(self) -> u64 {
        self.urgency_bonus_rupees
    }

    /// Returns the total suggested price in rupees.
    #[must_use]
    pub const fn total_rupees(self) -> u64 {
        self.base_rupees + self.distance_fee_rupees + self.urgency_bonus_rupees
    }
}

/// Suggests a price for a task over the given pickup distance.
///
/// The distance fee charges only whole kilometres, so a 2.3 km errand is
/// billed as 2 km.
#[must_use]
#[expect(
    clippy::integer_division,
    reason = "the distance fee charges whole kilometres only"
)]
pub const fn suggest_price(distance_m: u64, urgency: Urgency) -> PriceQuote {
    PriceQuote {
        base_rupees: BASE_FARE_RUPEES,
        distance_fee_rupees: PER_KM_RUPEES * (distance_m / 1000),
        urgency_bonus_rupees: urgency_bonus_rupees(urgency),
    }
}
