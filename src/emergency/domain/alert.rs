//! Emergency alert records and arrival estimates.

use super::{AlertPriority, EmergencyKind};
use crate::identity::domain::PhoneNumber;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Broadcast radius applied when the reporter picks none, in metres.
pub const DEFAULT_EMERGENCY_RADIUS_M: u64 = 5000;

/// Assumed responder pace used for arrival estimates.
pub const ETA_METRES_PER_MINUTE: u64 = 250;

/// Estimates arrival time over a distance, in whole minutes.
#[must_use]
#[expect(
    clippy::integer_division,
    reason = "arrival estimates count whole minutes at the assumed pace"
)]
pub const fn eta_minutes(distance_m: u64) -> u64 {
    distance_m / ETA_METRES_PER_MINUTE
}

/// An emergency broadcast tied to its backing task.
///
/// The alert itself is immutable once raised; progress lives on the task
/// and in the dispatch notifications sent for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyAlert {
    task_id: TaskId,
    kind: EmergencyKind,
    priority: AlertPriority,
    contact_phone: PhoneNumber,
    radius_m: u64,
    created_at: DateTime<Utc>,
}

impl EmergencyAlert {
    /// Raises an alert for a task, deriving priority from the kind.
    #[must_use]
    pub fn raise(
        task_id: TaskId,
        kind: EmergencyKind,
        contact_phone: PhoneNumber,
        radius_m: u64,
        clock: &impl Clock,
    ) -> Self {
        Self {
            task_id,
            kind,
            priority: kind.priority(),
            contact_phone,
            radius_m,
            created_at: clock.utc(),
        }
    }

    /// Returns the backing task's identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the kind of emergency.
    #[must_use]
    pub const fn kind(&self) -> EmergencyKind {
        self.kind
    }

    /// Returns the derived broadcast priority.
    #[must_use]
    pub const fn priority(&self) -> AlertPriority {
        self.priority
    }

    /// Returns the phone number responders should reach.
    #[must_use]
    pub const fn contact_phone(&self) -> &PhoneNumber {
        &self.contact_phone
    }

    /// Returns the broadcast radius, in metres.
    #[must_use]
    pub const fn radius_m(&self) -> u64 {
        self.radius_m
    }

    /// Returns when the alert was raised.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
