//! Application services for identity and trust.

mod directory;

pub use directory::{
    IdentityService, IdentityServiceError, RegisterUserRequest, SettlementRequest,
};
