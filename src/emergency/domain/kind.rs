//! Emergency kinds and their derived priority.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of emergency being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyKind {
    /// Vehicle breakdown or roadside trouble.
    Roadside,
    /// Medical situation needing someone on site.
    Medical,
    /// Time-critical delivery, such as medicines.
    UrgentDelivery,
    /// Stranded without transport.
    Stranded,
    /// Immediate personal assistance.
    ImmediateHelp,
    /// Anything that fits no other kind.
    Other,
}

impl EmergencyKind {
    /// Returns the canonical lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Roadside => "roadside",
            Self::Medical => "medical",
            Self::UrgentDelivery => "urgent_delivery",
            Self::Stranded => "stranded",
            Self::ImmediateHelp => "immediate_help",
            Self::Other => "other",
        }
    }

    /// Returns the broadcast priority for this kind.
    ///
    /// Medical situations and calls for immediate help are critical;
    /// everything else broadcasts as high.
    #[must_use]
    pub const fn priority(self) -> AlertPriority {
        match self {
            Self::Medical | Self::ImmediateHelp => AlertPriority::Critical,
            Self::Roadside | Self::UrgentDelivery | Self::Stranded | Self::Other => {
                AlertPriority::High
            }
        }
    }

    /// Returns the task title used when the reporter gives no note.
    #[must_use]
    pub const fn default_title(self) -> &'static str {
        match self {
            Self::Roadside => "Roadside assistance needed",
            Self::Medical => "Medical emergency",
            Self::UrgentDelivery => "Urgent delivery needed",
            Self::Stranded => "Stranded and need transport",
            Self::ImmediateHelp => "Immediate help needed",
            Self::Other => "Emergency assistance needed",
        }
    }
}

impl fmt::Display for EmergencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority tier of an emergency broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertPriority {
    /// Life or safety on the line.
    Critical,
    /// Urgent but not life-threatening.
    High,
}

impl AlertPriority {
    /// Returns the canonical lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
        }
    }
}

impl fmt::Display for AlertPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
