//! Projections of an alert's dispatch progress.

use crate::identity::domain::UserId;
use crate::task::domain::TaskStatus;
use serde::Serialize;

/// Counts of helper reactions to an alert's notifications.
///
/// Computed on demand from the backing task and its dispatch
/// notifications, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertStatus {
    /// Lifecycle state of the backing task.
    pub task_status: TaskStatus,
    /// Helpers notified so far.
    pub notified: usize,
    /// Helpers who accepted or declined.
    pub responded: usize,
    /// Helpers who accepted and are heading over.
    pub en_route: usize,
}

/// One responder on their way to an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponderSummary {
    /// The responding helper.
    pub helper: UserId,
    /// Distance from the alert when notified, in metres.
    pub distance_m: u64,
    /// The responder's trust score at lookup time.
    pub trust_score: u8,
    /// Estimated arrival in whole minutes.
    pub eta_minutes: u64,
}
