//! Application services for task registry orchestration.

mod registry;

pub use crate::task::domain::{PriceQuote, suggest_price};
pub use registry::{
    CreateTaskRequest, ListOpenFilter, TaskRegistryError, TaskRegistryResult, TaskRegistryService,
};
