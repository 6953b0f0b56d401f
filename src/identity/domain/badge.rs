//! Achievement badges derived from helper statistics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Completed tasks required for the Top Helper badge.
pub const TOP_HELPER_COMPLETIONS: u32 = 25;

/// Fast claims required for the Fast Responder badge.
pub const FAST_RESPONDER_CLAIMS: u32 = 10;

/// Emergency-tier completions required for the Emergency Hero badge.
pub const EMERGENCY_HERO_COMPLETIONS: u32 = 3;

/// Achievement badge shown on a helper profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    /// Earned by completing many tasks.
    TopHelper,
    /// Earned by repeatedly claiming tasks shortly after they are posted.
    FastResponder,
    /// Earned by completing several emergency-tier tasks.
    EmergencyHero,
}

impl Badge {
    /// Returns the display label for the badge.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TopHelper => "Top Helper",
            Self::FastResponder => "Fast Responder",
            Self::EmergencyHero => "Emergency Hero",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
