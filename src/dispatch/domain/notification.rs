//! Dispatch notifications and helper replies.

use super::{DispatchDomainError, NotificationId};
use crate::identity::domain::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Response state of a dispatch notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationResponse {
    /// The helper has not replied yet.
    Pending,
    /// The helper accepted the task.
    Accepted,
    /// The helper declined the task.
    Declined,
    /// The response window closed without a reply.
    Expired,
}

impl NotificationResponse {
    /// Returns the canonical lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Expired => "expired",
        }
    }

    /// Returns whether the notification still awaits a reply.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for NotificationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A helper's reply to a dispatch notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelperReply {
    /// The helper wants the task.
    Accept,
    /// The helper passes on the task.
    Decline,
}

/// Inputs for sending one dispatch notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDetails {
    /// Task the notification offers.
    pub task_id: TaskId,
    /// Helper being notified.
    pub helper: UserId,
    /// Position in the dispatch ranking, starting at 1.
    pub rank: u32,
    /// Helper's distance from the task, in metres.
    pub distance_m: u64,
    /// Rendered message shown to the helper.
    pub message: String,
    /// Seconds the helper has to reply.
    pub response_timeout_secs: u64,
}

/// One offer of a task to one helper.
///
/// A notification resolves at most once: the first accept, decline, or
/// expiry wins and later attempts are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchNotification {
    id: NotificationId,
    task_id: TaskId,
    helper: UserId,
    rank: u32,
    distance_m: u64,
    message: String,
    sent_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    response: NotificationResponse,
    responded_at: Option<DateTime<Utc>>,
    version: u64,
}

impl DispatchNotification {
    /// Sends a notification, stamping it with the clock and its deadline.
    #[must_use]
    pub fn send(details: NotificationDetails, clock: &impl Clock) -> Self {
        let sent_at = clock.utc();
        let timeout = i64::try_from(details.response_timeout_secs).unwrap_or(i64::MAX);
        let expires_at = TimeDelta::try_seconds(timeout)
            .and_then(|delta| sent_at.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            id: NotificationId::new(),
            task_id: details.task_id,
            helper: details.helper,
            rank: details.rank,
            distance_m: details.distance_m,
            message: details.message,
            sent_at,
            expires_at,
            response: NotificationResponse::Pending,
            responded_at: None,
            version: 1,
        }
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the task on offer.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the notified helper.
    #[must_use]
    pub const fn helper(&self) -> UserId {
        self.helper
    }

    /// Returns the helper's position in the dispatch ranking.
    #[must_use]
    pub const fn rank(&self) -> u32 {
        self.rank
    }

    /// Returns the helper's distance from the task, in metres.
    #[must_use]
    pub const fn distance_m(&self) -> u64 {
        self.distance_m
    }

    /// Returns the rendered notification message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns when the notification was sent.
    #[must_use]
    pub const fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// Returns when the response window closes.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns the current response state.
    #[must_use]
    pub const fn response(&self) -> NotificationResponse {
        self.response
    }

    /// Returns when the helper replied, if they did.
    #[must_use]
    pub const fn responded_at(&self) -> Option<DateTime<Utc>> {
        self.responded_at
    }

    /// Returns the record version for optimistic concurrency.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns whether the notification is pending and past its deadline.
    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.response.is_pending() && self.expires_at <= now
    }

    /// Records the helper's reply.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchDomainError::AlreadyResolved`] when the
    /// notification was already answered or expired.
    pub fn resolve(
        &mut self,
        reply: HelperReply,
        clock: &impl Clock,
    ) -> Result<(), DispatchDomainError> {
        if !self.response.is_pending() {
            return Err(DispatchDomainError::AlreadyResolved {
                notification_id: self.id,
                response: self.response,
            });
        }
        self.response = match reply {
            HelperReply::Accept => NotificationResponse::Accepted,
            HelperReply::Decline => NotificationResponse::Declined,
        };
        self.responded_at = Some(clock.utc());
        self.version = self.version.saturating_add(1);
        Ok(())
    }

    /// Marks an unanswered notification as expired.
    ///
    /// `responded_at` stays empty since nobody replied.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchDomainError::AlreadyResolved`] when the
    /// notification was already answered or expired.
    pub const fn expire(&mut self) -> Result<(), DispatchDomainError> {
        if !self.response.is_pending() {
            return Err(DispatchDomainError::AlreadyResolved {
                notification_id: self.id,
                response: self.response,
            });
        }
        self.response = NotificationResponse::Expired;
        self.version = self.version.saturating_add(1);
        Ok(())
    }
}
