//! Error types for task domain validation and transitions.

use super::{TaskId, TaskStatus};
use crate::identity::domain::UserId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The pickup or drop-off address is empty after trimming.
    #[error("task address must not be empty")]
    EmptyAddress,

    /// The price is not a positive rupee amount.
    #[error("invalid price {0}, expected a positive rupee amount")]
    InvalidPrice(u64),

    /// The completion proof note is empty after trimming.
    #[error("completion proof note must not be empty")]
    EmptyProofNote,

    /// The category value is unsupported.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// The urgency value is unsupported.
    #[error("unknown urgency: {0}")]
    UnknownUrgency(String),

    /// The requested status change is not permitted by the state machine.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Status the task currently holds.
        from: TaskStatus,
        /// Status the caller asked for.
        to: TaskStatus,
    },

    /// Another helper already holds the claim.
    #[error("task {task_id} is already claimed by another helper")]
    AlreadyClaimed {
        /// Task that is already claimed.
        task_id: TaskId,
    },

    /// The caller already holds the claim on this task.
    #[error("task {task_id} is already claimed by the caller")]
    AlreadyHeldByCaller {
        /// Task the caller already holds.
        task_id: TaskId,
    },

    /// The caller is not the helper assigned to this task.
    #[error("user {user_id} is not the claimant of task {task_id}")]
    NotClaimant {
        /// Task the caller tried to act on.
        task_id: TaskId,
        /// Caller who is not the claimant.
        user_id: UserId,
    },

    /// Posters cannot claim their own tasks.
    #[error("poster cannot claim their own task {task_id}")]
    SelfClaim {
        /// Task the poster tried to claim.
        task_id: TaskId,
    },

    /// The caller is not the poster of this task.
    #[error("user {user_id} is not the poster of task {task_id}")]
    NotPoster {
        /// Task the caller tried to act on.
        task_id: TaskId,
        /// Caller who is not the poster.
        user_id: UserId,
    },

    /// The poster has already rated this task.
    #[error("task {task_id} has already been rated")]
    AlreadyRated {
        /// Task that already carries a rating.
        task_id: TaskId,
    },

    /// The task has not been completed yet.
    #[error("task {task_id} is not completed")]
    NotCompleted {
        /// Task that is not completed.
        task_id: TaskId,
    },

    /// The task has no claimant to act for.
    #[error("task {task_id} is not claimed")]
    NotClaimed {
        /// Task that has no claimant.
        task_id: TaskId,
    },

    /// Concurrent writers kept invalidating the caller's update.
    #[error("task {task_id} was updated concurrently too many times")]
    LostClaimRace {
        /// Task whose update kept losing the race.
        task_id: TaskId,
    },
}
