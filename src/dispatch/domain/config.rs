//! Tunable parameters for the dispatch engine.

use crate::task::domain::Urgency;

/// Default notification message template.
///
/// Rendered with `title`, `urgency`, `distance_km`, and `price` variables.
pub const DEFAULT_MESSAGE_TEMPLATE: &str =
    "[{{ urgency|upper }}] {{ title }}: {{ distance_km }} km away. Pays ₹{{ price }}.";

/// Dispatch parameters keyed by urgency tier.
///
/// Radii bound the helper search, fanout caps how many helpers are
/// notified per round, and response timeouts decide when a pending
/// notification expires. Scoring weights must be read as percentages of
/// the blended ranking score.
///
/// # Examples
///
/// ```
/// use helphub::dispatch::domain::DispatchConfig;
///
/// let config = DispatchConfig::default();
/// assert_eq!(config.emergency_radius_m, 5000);
/// assert_eq!(config.proximity_weight + config.trust_weight, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Search radius for normal tasks, in metres.
    pub normal_radius_m: u64,
    /// Search radius for urgent tasks, in metres.
    pub urgent_radius_m: u64,
    /// Search radius for emergency tasks, in metres.
    pub emergency_radius_m: u64,
    /// Helpers notified per round for normal tasks.
    pub normal_fanout: usize,
    /// Helpers notified per round for urgent tasks.
    pub urgent_fanout: usize,
    /// Helpers notified per round for emergency tasks.
    pub emergency_fanout: usize,
    /// Seconds before a normal-task notification expires.
    pub normal_response_timeout_secs: u64,
    /// Seconds before an urgent-task notification expires.
    pub urgent_response_timeout_secs: u64,
    /// Seconds before an emergency-task notification expires.
    pub emergency_response_timeout_secs: u64,
    /// Weight of proximity in the ranking score, in percent.
    pub proximity_weight: u64,
    /// Weight of trust in the ranking score, in percent.
    pub trust_weight: u64,
    /// Template used to render notification messages.
    pub message_template: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            normal_radius_m: 2000,
            urgent_radius_m: 3000,
            emergency_radius_m: 5000,
            normal_fanout: 5,
            urgent_fanout: 8,
            emergency_fanout: 12,
            normal_response_timeout_secs: 900,
            urgent_response_timeout_secs: 300,
            emergency_response_timeout_secs: 120,
            proximity_weight: 70,
            trust_weight: 30,
            message_template: DEFAULT_MESSAGE_TEMPLATE.to_owned(),
        }
    }
}

impl DispatchConfig {
    /// Returns the search radius for an urgency tier, in metres.
    #[must_use]
    pub const fn radius_for(&self, urgency: Urgency) -> u64 {
        match urgency {
            Urgency::Normal => self.normal_radius_m,
            Urgency::Urgent => self.urgent_radius_m,
            Urgency::Emergency => self.emergency_radius_m,
        }
    }

    /// Returns the notification fanout for an urgency tier.
    #[must_use]
    pub const fn fanout_for(&self, urgency: Urgency) -> usize {
        match urgency {
            Urgency::Normal => self.normal_fanout,
            Urgency::Urgent => self.urgent_fanout,
            Urgency::Emergency => self.emergency_fanout,
        }
    }

    /// Returns the response timeout for an urgency tier, in seconds.
    #[must_use]
    pub const fn response_timeout_secs_for(&self, urgency: Urgency) -> u64 {
        match urgency {
            Urgency::Normal => self.normal_response_timeout_secs,
            Urgency::Urgent => self.urgent_response_timeout_secs,
            Urgency::Emergency => self.emergency_response_timeout_secs,
        }
    }
}
