//! Domain types for dispatching tasks to nearby helpers.

mod candidate;
mod config;
mod error;
mod ids;
mod notification;

pub use candidate::{Candidate, CandidateRanking, HelperProfile};
pub use config::{DEFAULT_MESSAGE_TEMPLATE, DispatchConfig};
pub use error::DispatchDomainError;
pub use ids::NotificationId;
pub use notification::{
    DispatchNotification, HelperReply, NotificationDetails, NotificationResponse,
};
