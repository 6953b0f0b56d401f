//! Step definitions for emergency broadcast scenarios.

pub mod given;
pub mod then;
pub mod world;
