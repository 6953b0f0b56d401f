//! Domain types for emergency alerts.

mod alert;
mod kind;
mod status;

pub use alert::{
    DEFAULT_EMERGENCY_RADIUS_M, ETA_METRES_PER_MINUTE, EmergencyAlert, eta_minutes,
};
pub use kind::{AlertPriority, EmergencyKind};
pub use status::{AlertStatus, ResponderSummary};
