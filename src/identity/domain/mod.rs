//! Domain model for identity and trust accounting.
//!
//! The identity domain models user registration, phone validation,
//! verification state, rating averages, and the derived trust score while
//! keeping all infrastructure concerns outside of the domain boundary.

mod badge;
mod error;
mod ids;
mod rating;
mod user;

pub use badge::{
    Badge, EMERGENCY_HERO_COMPLETIONS, FAST_RESPONDER_CLAIMS, TOP_HELPER_COMPLETIONS,
};
pub use error::IdentityDomainError;
pub use ids::{PhoneNumber, UserId};
pub use rating::{RatingAverage, RatingValue};
pub use user::{CompletionCredit, NewUserProfile, Role, User, Verification, VerificationKind};
