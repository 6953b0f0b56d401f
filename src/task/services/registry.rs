//! Orchestration service for posting, claiming, and fulfilling tasks.

use crate::geo::GeoPoint;
use crate::identity::domain::{RatingValue, UserId};
use crate::task::{
    domain::{
        Category, CompletionProof, Price, Task, TaskDetails, TaskDomainError, TaskId, Urgency,
    },
    ports::{
        CompletedAssignment, CompletionSettlement, DispatchQueue, DispatchRequest,
        SettlementError, TaskStore, TaskStoreError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Time window after posting inside which a claim counts as fast, in
/// seconds.
const FAST_CLAIM_WINDOW_SECS: i64 = 600;

/// Upper bound on compare-and-swap retries before giving up on a record.
const MAX_UPDATE_ATTEMPTS: usize = 8;

/// Request payload for posting a new task.
///
/// Category defaults to `other` and urgency to `normal` unless overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    poster: UserId,
    title: String,
    description: String,
    category: String,
    urgency: String,
    location: GeoPoint,
    address: String,
    price_rupees: u64,
    requirements: Vec<String>,
    dispatch_radius_m: Option<u64>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        poster: UserId,
        title: impl Into<String>,
        description: impl Into<String>,
        location: GeoPoint,
        address: impl Into<String>,
        price_rupees: u64,
    ) -> Self {
        Self {
            poster,
            title: title.into(),
            description: description.into(),
            category: "other".to_owned(),
            urgency: "normal".to_owned(),
            location,
            address: address.into(),
            price_rupees,
            requirements: Vec::new(),
            dispatch_radius_m: None,
        }
    }

    /// Sets the task category by name.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the urgency tier by name.
    #[must_use]
    pub fn with_urgency(mut self, urgency: impl Into<String>) -> Self {
        self.urgency = urgency.into();
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
}

/// Filter for listing open tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOpenFilter {
    category: Option<Category>,
    urgency: Option<Urgency>,
}

impl ListOpenFilter {
    /// Creates an empty filter matching every open task.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            category: None,
            urgency: None,
        }
    }

    /// Restricts results to one category.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Restricts results to one urgency tier.
    #[must_use]
    pub const fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = Some(urgency);
        self
    }

    fn matches(self, task: &Task) -> bool {
        self.category.is_none_or(|category| task.category() == category)
            && self.urgency.is_none_or(|urgency| task.urgency() == urgency)
    }
}

/// Service-level errors for task registry operations.
///
/// Domain failures are classified by family so transport layers can map
/// them onto status codes without matching on every domain variant.
#[derive(Debug, Error)]
pub enum TaskRegistryError {
    /// Input failed domain validation.
    #[error(transparent)]
    Validation(TaskDomainError),
    /// No task exists for the identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// Another caller won a race the operation depended on.
    #[error(transparent)]
    Conflict(TaskDomainError),
    /// The task is not in a state that permits the operation.
    #[error(transparent)]
    InvalidState(TaskDomainError),
    /// The caller is not allowed to perform the operation.
    #[error(transparent)]
    Forbidden(TaskDomainError),
    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
    /// Settlement of a completed task failed.
    #[error(transparent)]
    Settlement(#[from] SettlementError),
}

/// Classifies a domain error into the failure family exposed to callers.
fn classify(err: TaskDomainError) -> TaskRegistryError {
    use TaskDomainError as E;
    match err {
        E::EmptyTitle
        | E::EmptyDescription
        | E::EmptyAddress
        | E::InvalidPrice(_)
        | E::EmptyProofNote
        | E::UnknownCategory(_)
        | E::UnknownUrgency(_) => TaskRegistryError::Validation(err),
        E::AlreadyClaimed { .. } | E::AlreadyRated { .. } | E::LostClaimRace { .. } => {
            TaskRegistryError::Conflict(err)
        }
        E::InvalidTransition { .. }
        | E::AlreadyHeldByCaller { .. }
        | E::NotCompleted { .. }
        | E::NotClaimed { .. } => TaskRegistryError::InvalidState(err),
        E::NotClaimant { .. } | E::NotPoster { .. } | E::SelfClaim { .. } => {
            TaskRegistryError::Forbidden(err)
        }
    }
}

/// Result type for task registry service operations.
pub type TaskRegistryResult<T> = Result<T, TaskRegistryError>;

/// Task registry orchestration service.
#[derive(Clone)]
pub struct TaskRegistryService<S, Q, P, C>
where
    S: TaskStore,
    Q: DispatchQueue,
    P: CompletionSettlement,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    queue: Arc<Q>,
    settlement: Arc<P>,
    clock: Arc<C>,
}

impl<S, Q, P, C> TaskRegistryService<S, Q, P, C>
where
    S: TaskStore,
    Q: DispatchQueue,
    P: CompletionSettlement,
    C: Clock + Send + Sync,
{
    /// Creates a new task registry service.
    #[must_use]
    pub const fn new(store: Arc<S>, queue: Arc<Q>, settlement: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            store,
            queue,
            settlement,
            clock,
        }
    }

    /// Posts a new task and hands it to the dispatch queue.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Validation`] when a field fails domain
    /// validation and [`TaskRegistryError::Store`] when persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskRegistryResult<Task> {
        let category = Category::parse(&request.category).map_err(classify)?;
        let urgency = Urgency::parse(&request.urgency).map_err(classify)?;
        let price = Price::new(request.price_rupees).map_err(classify)?;
        let mut details = TaskDetails::new(
            request.poster,
            request.title,
            request.description,
            request.location,
            request.address,
            price,
        )
        .map_err(classify)?
        .with_category(category)
        .with_urgency(urgency)
        .with_requirements(request.requirements);
        if let Some(radius_m) = request.dispatch_radius_m {
            details = details.with_dispatch_radius(radius_m);
        }

        let task = Task::post(details, &*self.clock);
        self.store.insert(&task).await?;
        info!(task_id = %task.id(), urgency = %task.urgency(), "task posted");
        self.enqueue_dispatch(&task).await;
        Ok(task)
    }

    /// Claims an open task for a helper.
    ///
    /// Racing claims resolve to exactly one winner; every other caller
    /// observes [`TaskRegistryError::Conflict`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::NotFound`] for unknown tasks,
    /// [`TaskRegistryError::Forbidden`] when the poster claims their own
    /// task, [`TaskRegistryError::Conflict`] when another helper holds the
    /// claim, and [`TaskRegistryError::InvalidState`] when the task cannot
    /// be claimed.
    pub async fn claim_task(&self, task_id: TaskId, helper: UserId) -> TaskRegistryResult<Task> {
        self.mutate(task_id, |task, clock| task.claim(helper, clock))
            .await
    }

    /// Marks a claimed task as in progress.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Forbidden`] when the caller does not
    /// hold the claim and [`TaskRegistryError::InvalidState`] when the task
    /// is not in `Accepted`.
    pub async fn start_task(&self, task_id: TaskId, helper: UserId) -> TaskRegistryResult<Task> {
        self.mutate(task_id, |task, clock| task.start(helper, clock))
            .await
    }

    /// Releases a claim and reopens the task for dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Forbidden`] when the caller does not
    /// hold the claim and [`TaskRegistryError::InvalidState`] when the task
    /// is open or completed.
    pub async fn withdraw(&self, task_id: TaskId, helper: UserId) -> TaskRegistryResult<Task> {
        let task = self
            .mutate(task_id, |task, clock| task.withdraw(helper, clock))
            .await?;
        self.enqueue_dispatch(&task).await;
        Ok(task)
    }

    /// Attaches completion proof, completes the task, and settles the
    /// helper's earnings and statistics.
    ///
    /// The completed task persists even when settlement fails; the failure
    /// is surfaced so callers can retry the credit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Validation`] for a blank note,
    /// [`TaskRegistryError::Forbidden`] when the caller does not hold the
    /// claim, [`TaskRegistryError::InvalidState`] when the task is not in
    /// progress, and [`TaskRegistryError::Settlement`] when crediting the
    /// helper fails.
    pub async fn submit_proof(
        &self,
        task_id: TaskId,
        helper: UserId,
        note: impl Into<String>,
        photo_refs: Vec<String>,
    ) -> TaskRegistryResult<Task> {
        let proof = CompletionProof::new(note, photo_refs, &*self.clock).map_err(classify)?;
        let task = self
            .mutate(task_id, move |task, clock| {
                task.submit_proof(helper, proof.clone(), clock)
            })
            .await?;

        let assignment = completed_assignment(&task, helper);
        if let Err(err) = self.settlement.settle(&assignment).await {
            warn!(task_id = %task.id(), helper = %helper, error = %err, "completion settlement failed");
            return Err(TaskRegistryError::Settlement(err));
        }
        Ok(task)
    }

    /// Records the poster's one-time rating and folds it into the helper's
    /// record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Forbidden`] when the caller did not
    /// post the task, [`TaskRegistryError::InvalidState`] before
    /// completion, and [`TaskRegistryError::Conflict`] on a second rating.
    pub async fn rate_helper(
        &self,
        task_id: TaskId,
        poster: UserId,
        rating: RatingValue,
    ) -> TaskRegistryResult<Task> {
        let task = self
            .mutate(task_id, |task, clock| {
                task.record_helper_rating(poster, rating, clock)
            })
            .await?;
        if let Some(helper) = task.claimant() {
            self.settlement.apply_rating(helper, rating).await?;
        }
        Ok(task)
    }

    /// Fetches a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::NotFound`] when the task does not
    /// exist.
    pub async fn task(&self, task_id: TaskId) -> TaskRegistryResult<Task> {
        self.find_or_error(task_id).await
    }

    /// Lists open tasks matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Store`] when the listing fails.
    pub async fn list_open(&self, filter: ListOpenFilter) -> TaskRegistryResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .store
            .list_open()
            .await?
            .into_iter()
            .filter(|task| filter.matches(task))
            .collect();
        tasks.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(tasks)
    }

    /// Hands a freshly opened task to the dispatch queue.
    ///
    /// Dispatch is best effort; a closed queue is logged and the task
    /// stays claimable through listings.
    async fn enqueue_dispatch(&self, task: &Task) {
        let mut request = DispatchRequest::new(task.id());
        if let Some(radius_m) = task.dispatch_radius_m() {
            request = request.with_radius(radius_m);
        }
        if let Err(err) = self.queue.enqueue(request).await {
            warn!(task_id = %task.id(), error = %err, "failed to enqueue dispatch request");
        }
    }

    /// Reloads, mutates, and writes back a task record.
    ///
    /// Version conflicts trigger a reload and retry up to
    /// [`MAX_UPDATE_ATTEMPTS`] times before the operation is reported as a
    /// lost race.
    async fn mutate<F>(&self, task_id: TaskId, mut apply: F) -> TaskRegistryResult<Task>
    where
        F: FnMut(&mut Task, &C) -> Result<(), TaskDomainError>,
    {
        for _ in 0..MAX_UPDATE_ATTEMPTS {
            let mut task = self.find_or_error(task_id).await?;
            let expected = task.version();
            apply(&mut task, &*self.clock).map_err(classify)?;
            match self.store.update(&task, expected).await {
                Ok(()) => return Ok(task),
                Err(TaskStoreError::VersionConflict { .. }) => {}
                Err(err) => return Err(TaskRegistryError::Store(err)),
            }
        }
        Err(classify(TaskDomainError::LostClaimRace { task_id }))
    }

    async fn find_or_error(&self, task_id: TaskId) -> TaskRegistryResult<Task> {
        self.store
            .find_by_id(task_id)
            .await?
            .ok_or(TaskRegistryError::NotFound(task_id))
    }
}

fn completed_assignment(task: &Task, helper: UserId) -> CompletedAssignment {
    let fast_claim = task.claimed_at().is_some_and(|claimed_at| {
        (claimed_at - task.created_at()).num_seconds() <= FAST_CLAIM_WINDOW_SECS
    });
    CompletedAssignment {
        helper,
        task_id: task.id(),
        price_rupees: task.price().rupees(),
        emergency: task.urgency() == Urgency::Emergency,
        fast_claim,
    }
}
