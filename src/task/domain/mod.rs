//! Domain model for the task registry.
//!
//! The task domain models posting, claiming, fulfilment, and rating while
//! keeping all infrastructure concerns outside of the domain boundary.

mod category;
mod error;
mod ids;
mod pricing;
mod proof;
mod task;

pub use category::{Category, Urgency};
pub use error::TaskDomainError;
pub use ids::{Price, TaskId};
pub use pricing::{BASE_FARE_RUPEES, PER_KM_RUPEES, PriceQuote, suggest_price, urgency_bonus_rupees};
pub use proof::CompletionProof;
pub use task::{StatusChange, Task, TaskDetails, TaskStatus};
