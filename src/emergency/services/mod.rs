//! Application services for emergency broadcast.

mod broadcast;

pub use broadcast::{
    CreateAlertRequest, EmergencyBroadcastService, EmergencyServiceError, EmergencyServiceResult,
};
