//! Task aggregate root and lifecycle state machine.

use super::{Category, CompletionProof, Price, TaskDomainError, TaskId, Urgency};
use crate::geo::GeoPoint;
use crate::identity::domain::{RatingValue, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle states for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Posted and visible to helpers.
    Open,
    /// Claimed by a helper who has not started yet.
    Accepted,
    /// The helper is actively working on the task.
    InProgress,
    /// Fulfilled, with completion proof attached.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Accepted => "accepted",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Returns whether the state machine allows moving to `target`.
    ///
    /// Withdrawing from `Accepted` or `InProgress` reopens the task;
    /// `Completed` is terminal.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::Accepted)
                | (Self::Accepted, Self::InProgress | Self::Open)
                | (Self::InProgress, Self::Completed | Self::Open)
        )
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in a task's status history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    from: Option<TaskStatus>,
    to: TaskStatus,
    at: DateTime<Utc>,
}

impl StatusChange {
    /// Returns the status before the change, `None` for the initial entry.
    #[must_use]
    pub const fn from(&self) -> Option<TaskStatus> {
        self.from
    }

    /// Returns the status after the change.
    #[must_use]
    pub const fn to(&self) -> TaskStatus {
        self.to
    }

    /// Returns when the change happened.
    #[must_use]
    pub const fn at(&self) -> DateTime<Utc> {
        self.at
    }
}

/// Validated details for posting a new task.
///
/// Category defaults to [`Category::Other`] and urgency to
/// [`Urgency::Normal`] unless overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    poster: UserId,
    title: String,
    description: String,
    category: Category,
    urgency: Urgency,
    location: GeoPoint,
    address: String,
    price: Price,
    requirements: Vec<String>,
    dispatch_radius_m: Option<u64>,
}

impl TaskDetails {
    /// Creates validated task details.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`],
    /// [`TaskDomainError::EmptyDescription`], or
    /// [`TaskDomainError::EmptyAddress`] when a text field is blank.
    pub fn new(
        poster: UserId,
        title: impl Into<String>,
        description: impl Into<String>,
        location: GeoPoint,
        address: impl Into<String>,
        price: Price,
    ) -> Result<Self, TaskDomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(TaskDomainError::EmptyDescription);
        }
        let address = address.into();
        if address.trim().is_empty() {
            return Err(TaskDomainError::EmptyAddress);
        }
        Ok(Self {
            poster,
            title,
            description,
            category: Category::Other,
            urgency: Urgency::Normal,
            location,
            address,
            price,
            requirements: Vec::new(),
            dispatch_radius_m: None,
        })
    }

    /// Sets the task category.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Sets the urgency tier.
    #[must_use]
    pub const fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    /// Attaches requirements the helper must meet.
    #[must_use]
    pub fn with_requirements(mut self, requirements: impl IntoIterator<Item = String>) -> Self {
        self.requirements = requirements.into_iter().collect();
        self
    }

    /// Overrides the dispatch radius instead of deriving it from urgency.
    #[must_use]
    pub const fn with_dispatch_radius(mut self, radius_m: u64) -> Self {
        self.dispatch_radius_m = Some(radius_m);
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the urgency tier.
    #[must_use]
    pub const fn urgency(&self) -> Urgency {
        self.urgency
    }

    /// Returns the dispatch radius override, if any.
    #[must_use]
    pub const fn dispatch_radius_m(&self) -> Option<u64> {
        self.dispatch_radius_m
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    poster: UserId,
    title: String,
    description: String,
    category: Category,
    urgency: Urgency,
    location: GeoPoint,
    address: String,
    price: Price,
    requirements: Vec<String>,
    dispatch_radius_m: Option<u64>,
    status: TaskStatus,
    claimant: Option<UserId>,
    claimed_at: Option<DateTime<Utc>>,
    proof: Option<CompletionProof>,
    helper_rating: Option<RatingValue>,
    history: Vec<StatusChange>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
}

impl Task {
    /// Posts a new open task.
    #[must_use]
    pub fn post(details: TaskDetails, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            poster: details.poster,
            title: details.title,
            description: details.description,
            category: details.category,
            urgency: details.urgency,
            location: details.location,
            address: details.address,
            price: details.price,
            requirements: details.requirements,
            dispatch_radius_m: details.dispatch_radius_m,
            status: TaskStatus::Open,
            claimant: None,
            claimed_at: None,
            proof: None,
            helper_rating: None,
            history: vec![StatusChange {
                from: None,
                to: TaskStatus::Open,
                at: timestamp,
            }],
            created_at: timestamp,
            updated_at: timestamp,
            version: 1,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the poster's identifier.
    #[must_use]
    pub const fn poster(&self) -> UserId {
        self.poster
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the urgency tier.
    #[must_use]
    pub const fn urgency(&self) -> Urgency {
        self.urgency
    }

    /// Returns the pickup or job location.
    #[must_use]
    pub const fn location(&self) -> GeoPoint {
        self.location
    }

    /// Returns the human-readable address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the agreed price.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Returns the requirements a helper must meet.
    #[must_use]
    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    /// Returns the poster's dispatch radius override, if any.
    #[must_use]
    pub const fn dispatch_radius_m(&self) -> Option<u64> {
        self.dispatch_radius_m
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the helper currently holding the claim.
    #[must_use]
    pub const fn claimant(&self) -> Option<UserId> {
        self.claimant
    }

    /// Returns when the current claim was made.
    #[must_use]
    pub const fn claimed_at(&self) -> Option<DateTime<Utc>> {
        self.claimed_at
    }

    /// Returns the completion proof once submitted.
    #[must_use]
    pub const fn proof(&self) -> Option<&CompletionProof> {
        self.proof.as_ref()
    }

    /// Returns the poster's rating of the helper, if given.
    #[must_use]
    pub const fn helper_rating(&self) -> Option<RatingValue> {
        self.helper_rating
    }

    /// Returns the status history, oldest entry first.
    #[must_use]
    pub fn history(&self) -> &[StatusChange] {
        &self.history
    }

    /// Returns the posting timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the optimistic-concurrency version counter.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Claims the task for a helper.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SelfClaim`] when the poster claims their
    /// own task, [`TaskDomainError::AlreadyHeldByCaller`] when the helper
    /// already holds the claim, [`TaskDomainError::AlreadyClaimed`] when
    /// another helper does, and [`TaskDomainError::InvalidTransition`] when
    /// the task is completed.
    pub fn claim(&mut self, helper: UserId, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if helper == self.poster {
            return Err(TaskDomainError::SelfClaim { task_id: self.id });
        }
        match self.status {
            TaskStatus::Open => {
                self.claimant = Some(helper);
                self.transition(TaskStatus::Accepted, clock);
                self.claimed_at = Some(self.updated_at);
                Ok(())
            }
            TaskStatus::Accepted | TaskStatus::InProgress => {
                if self.claimant == Some(helper) {
                    Err(TaskDomainError::AlreadyHeldByCaller { task_id: self.id })
                } else {
                    Err(TaskDomainError::AlreadyClaimed { task_id: self.id })
                }
            }
            TaskStatus::Completed => Err(self.transition_error(TaskStatus::Accepted)),
        }
    }

    /// Marks the claimed task as in progress.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotClaimant`] when the caller does not
    /// hold the claim and [`TaskDomainError::InvalidTransition`] when the
    /// task is not in `Accepted`.
    pub fn start(&mut self, helper: UserId, clock: &impl Clock) -> Result<(), TaskDomainError> {
        match self.status {
            TaskStatus::Accepted => {
                if self.claimant != Some(helper) {
                    return Err(TaskDomainError::NotClaimant {
                        task_id: self.id,
                        user_id: helper,
                    });
                }
                self.transition(TaskStatus::InProgress, clock);
                Ok(())
            }
            TaskStatus::Open | TaskStatus::InProgress | TaskStatus::Completed => {
                Err(self.transition_error(TaskStatus::InProgress))
            }
        }
    }

    /// Releases the claim and reopens the task for dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotClaimed`] when the task is open,
    /// [`TaskDomainError::NotClaimant`] when the caller does not hold the
    /// claim, and [`TaskDomainError::InvalidTransition`] when the task is
    /// completed.
    pub fn withdraw(&mut self, helper: UserId, clock: &impl Clock) -> Result<(), TaskDomainError> {
        match self.status {
            TaskStatus::Open => Err(TaskDomainError::NotClaimed { task_id: self.id }),
            TaskStatus::Accepted | TaskStatus::InProgress => {
                if self.claimant != Some(helper) {
                    return Err(TaskDomainError::NotClaimant {
                        task_id: self.id,
                        user_id: helper,
                    });
                }
                self.claimant = None;
                self.claimed_at = None;
                self.transition(TaskStatus::Open, clock);
                Ok(())
            }
            TaskStatus::Completed => Err(self.transition_error(TaskStatus::Open)),
        }
    }

    /// Attaches completion proof and moves the task to `Completed`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotClaimant`] when the caller does not
    /// hold the claim and [`TaskDomainError::InvalidTransition`] when the
    /// task is not in `InProgress`.
    pub fn submit_proof(
        &mut self,
        helper: UserId,
        proof: CompletionProof,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        match self.status {
            TaskStatus::InProgress => {
                if self.claimant != Some(helper) {
                    return Err(TaskDomainError::NotClaimant {
                        task_id: self.id,
                        user_id: helper,
                    });
                }
                self.proof = Some(proof);
                self.transition(TaskStatus::Completed, clock);
                Ok(())
            }
            TaskStatus::Open | TaskStatus::Accepted | TaskStatus::Completed => {
                Err(self.transition_error(TaskStatus::Completed))
            }
        }
    }

    /// Records the poster's one-time rating of the helper.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotPoster`] when the caller did not post
    /// the task, [`TaskDomainError::NotCompleted`] before completion, and
    /// [`TaskDomainError::AlreadyRated`] on a second rating.
    pub fn record_helper_rating(
        &mut self,
        caller: UserId,
        rating: RatingValue,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if caller != self.poster {
            return Err(TaskDomainError::NotPoster {
                task_id: self.id,
                user_id: caller,
            });
        }
        if self.status != TaskStatus::Completed {
            return Err(TaskDomainError::NotCompleted { task_id: self.id });
        }
        if self.helper_rating.is_some() {
            return Err(TaskDomainError::AlreadyRated { task_id: self.id });
        }
        self.helper_rating = Some(rating);
        self.touch(clock);
        Ok(())
    }

    /// Applies a status change and records it in the history.
    fn transition(&mut self, to: TaskStatus, clock: &impl Clock) {
        let at = clock.utc();
        self.history.push(StatusChange {
            from: Some(self.status),
            to,
            at,
        });
        self.status = to;
        self.updated_at = at;
        self.version = self.version.saturating_add(1);
    }

    const fn transition_error(&self, to: TaskStatus) -> TaskDomainError {
        TaskDomainError::InvalidTransition {
            task_id: self.id,
            from: self.status,
            to,
        }
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.version = self.version.saturating_add(1);
    }
}
