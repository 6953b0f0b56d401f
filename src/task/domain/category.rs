//! Task categories and urgency tiers.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of help a task asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Grocery or household shopping runs.
    Groceries,
    /// Medicine pickup from a pharmacy.
    Medicine,
    /// Document collection, submission, or delivery.
    Documents,
    /// General parcel pickup and drop-off.
    Delivery,
    /// Emergency assistance of any kind.
    Emergency,
    /// Anything the other categories do not cover.
    Other,
}

impl Category {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Groceries => "groceries",
            Self::Medicine => "medicine",
            Self::Documents => "documents",
            Self::Delivery => "delivery",
            Self::Emergency => "emergency",
            Self::Other => "other",
        }
    }

    /// Parses a canonical category name, ignoring case and surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownCategory`] for unrecognized input.
    pub fn parse(value: &str) -> Result<Self, TaskDomainError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "groceries" => Ok(Self::Groceries),
            "medicine" => Ok(Self::Medicine),
            "documents" => Ok(Self::Documents),
            "delivery" => Ok(Self::Delivery),
            "emergency" => Ok(Self::Emergency),
            "other" => Ok(Self::Other),
            other => Err(TaskDomainError::UnknownCategory(other.to_owned())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How quickly a task needs attention.
///
/// Urgency drives the dispatch radius, fanout, response timeout, and the
/// bonus component of the suggested price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// No particular time pressure.
    Normal,
    /// Needed within the hour.
    Urgent,
    /// Needed immediately.
    Emergency,
}

impl Urgency {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Urgent => "urgent",
            Self::Emergency => "emergency",
        }
    }

    /// Parses a canonical urgency name, ignoring case and surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownUrgency`] for unrecognized input.
    pub fn parse(value: &str) -> Result<Self, TaskDomainError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "urgent" => Ok(Self::Urgent),
            "emergency" => Ok(Self::Emergency),
            other => Err(TaskDomainError::UnknownUrgency(other.to_owned())),
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
