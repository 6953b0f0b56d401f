//! Matching engine that fans tasks out to ranked helpers.

use minijinja::Environment;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::dispatch::{
    domain::{
        Candidate, CandidateRanking, DispatchConfig, DispatchDomainError, DispatchNotification,
        HelperProfile, HelperReply, NotificationDetails, NotificationId,
    },
    ports::{
        CandidateSource, CandidateSourceError, ClaimOutcome, NotificationStore,
        NotificationStoreError, TaskGateway, TaskGatewayError,
    },
};
use crate::task::domain::{Task, TaskId, TaskStatus};
use crate::task::ports::DispatchRequest;
use mockable::Clock;
use thiserror::Error;
use tracing::{debug, info};

/// Upper bound on compare-and-swap retries before giving up on a record.
const MAX_UPDATE_ATTEMPTS: usize = 8;

/// Service-level errors for dispatch operations.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No notification exists for the identifier.
    #[error("notification {0} not found")]
    NotFound(NotificationId),
    /// The task to dispatch does not exist.
    #[error("task {0} not found")]
    UnknownTask(TaskId),
    /// Concurrent updates exhausted the retry budget.
    #[error("notification {0} kept changing under concurrent updates")]
    ConcurrentUpdate(NotificationId),
    /// The notification is not in a state that permits the operation.
    #[error(transparent)]
    InvalidState(DispatchDomainError),
    /// The notification message template failed to render.
    #[error(transparent)]
    Template(DispatchDomainError),
    /// The notification store failed.
    #[error(transparent)]
    Store(#[from] NotificationStoreError),
    /// The helper profile lookup failed.
    #[error(transparent)]
    Candidates(#[from] CandidateSourceError),
    /// The task gateway failed.
    #[error(transparent)]
    Gateway(#[from] TaskGatewayError),
}

/// Notifications produced by one dispatch round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Task that was dispatched.
    pub task_id: TaskId,
    /// Notifications sent, best-ranked first.
    pub notifications: Vec<DispatchNotification>,
}

/// Result of recording a helper's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// The helper accepted and won the claim.
    Claimed(Task),
    /// The reply was recorded without further effect.
    Recorded,
    /// The helper accepted, but the task was no longer available.
    RecordedLate,
}

/// Dispatch and matching engine.
///
/// Each dispatch round loads the task, ranks eligible helpers on blended
/// proximity and trust, and sends notifications to the fanout head of the
/// ranking. Replies resolve notifications exactly once; accepts route
/// through the task gateway so the registry picks the single winner.
#[derive(Clone)]
pub struct DispatchEngine<N, D, G, C>
where
    N: NotificationStore,
    D: CandidateSource,
    G: TaskGateway,
    C: Clock + Send + Sync,
{
    notifications: Arc<N>,
    directory: Arc<D>,
    gateway: Arc<G>,
    clock: Arc<C>,
    config: DispatchConfig,
}

impl<N, D, G, C> DispatchEngine<N, D, G, C>
where
    N: NotificationStore,
    D: CandidateSource,
    G: TaskGateway,
    C: Clock + Send + Sync,
{
    /// Creates an engine with default dispatch parameters.
    #[must_use]
    pub fn new(
        notifications: Arc<N>,
        directory: Arc<D>,
        gateway: Arc<G>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            notifications,
            directory,
            gateway,
            clock,
            config: DispatchConfig::default(),
        }
    }

    /// Replaces the dispatch parameters.
    #[must_use]
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active dispatch parameters.
    #[must_use]
    pub const fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Dispatches one task to its best-ranked nearby helpers.
    ///
    /// A task that is no longer open produces an empty outcome; dispatch
    /// requests can linger in the queue while a helper claims directly.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownTask`] when the task does not
    /// exist, [`DispatchError::Candidates`] when the helper lookup fails,
    /// [`DispatchError::Template`] when the message template fails to
    /// render, and [`DispatchError::Store`] when persisting a
    /// notification fails.
    pub async fn dispatch(&self, request: DispatchRequest) -> Result<DispatchOutcome, DispatchError> {
        let task_id = request.task_id();
        let task = self
            .gateway
            .load(task_id)
            .await?
            .ok_or(DispatchError::UnknownTask(task_id))?;
        if task.status() != TaskStatus::Open {
            debug!(task_id = %task_id, status = %task.status(), "skipping dispatch for non-open task");
            return Ok(DispatchOutcome {
                task_id,
                notifications: Vec::new(),
            });
        }

        let radius_m = request
            .radius_m()
            .or(task.dispatch_radius_m())
            .unwrap_or_else(|| self.config.radius_for(task.urgency()));
        let profiles = self.directory.helper_profiles().await?;
        let ranking = self.rank_candidates(&task, radius_m, profiles);
        debug!(
            task_id = %task_id,
            radius_m,
            candidates = ranking.len(),
            "ranked dispatch candidates"
        );

        let fanout = self.config.fanout_for(task.urgency());
        let timeout_secs = self.config.response_timeout_secs_for(task.urgency());
        let mut sent = Vec::new();
        for (index, candidate) in ranking.take(fanout).enumerate() {
            let message = render_message(
                &self.config.message_template,
                &task,
                candidate.distance_m(),
            )
            .map_err(DispatchError::Template)?;
            let details = NotificationDetails {
                task_id,
                helper: candidate.user_id(),
                rank: u32::try_from(index.saturating_add(1)).unwrap_or(u32::MAX),
                distance_m: candidate.distance_m(),
                message,
                response_timeout_secs: timeout_secs,
            };
            let notification = DispatchNotification::send(details, &*self.clock);
            self.notifications.insert(&notification).await?;
            sent.push(notification);
        }

        Ok(DispatchOutcome {
            task_id,
            notifications: sent,
        })
    }

    /// Records a helper's reply to a notification.
    ///
    /// An accept routes into the task gateway; when the task is already
    /// taken the reply still resolves and the caller sees
    /// [`ResponseOutcome::RecordedLate`].
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NotFound`] for unknown notifications,
    /// [`DispatchError::InvalidState`] when the notification was already
    /// resolved, and [`DispatchError::ConcurrentUpdate`] when retries
    /// against racing writers are exhausted.
    pub async fn record_response(
        &self,
        notification_id: NotificationId,
        reply: HelperReply,
    ) -> Result<ResponseOutcome, DispatchError> {
        for _ in 0..MAX_UPDATE_ATTEMPTS {
            let mut notification = self
                .notifications
                .find_by_id(notification_id)
                .await?
                .ok_or(DispatchError::NotFound(notification_id))?;
            let expected = notification.version();
            notification
                .resolve(reply, &*self.clock)
                .map_err(DispatchError::InvalidState)?;
            match self.notifications.update(&notification, expected).await {
                Ok(()) => {
                    return match reply {
                        HelperReply::Accept => self.claim_after_accept(&notification).await,
                        HelperReply::Decline => Ok(ResponseOutcome::Recorded),
                    };
                }
                Err(NotificationStoreError::VersionConflict { .. }) => {}
                Err(err) => return Err(DispatchError::Store(err)),
            }
        }
        Err(DispatchError::ConcurrentUpdate(notification_id))
    }

    /// Lists every notification sent for a task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Store`] when the listing fails.
    pub async fn notifications_for(
        &self,
        task_id: TaskId,
    ) -> Result<Vec<DispatchNotification>, DispatchError> {
        Ok(self.notifications.list_for_task(task_id).await?)
    }

    fn rank_candidates(
        &self,
        task: &Task,
        radius_m: u64,
        profiles: Vec<HelperProfile>,
    ) -> CandidateRanking {
        let candidates = profiles
            .into_iter()
            .filter(|profile| profile.phone_verified && profile.user_id != task.poster())
            .filter_map(|profile| {
                let distance = task.location().distance_m(profile.location);
                (distance <= radius_m)
                    .then(|| Candidate::scored(profile, distance, radius_m, &self.config))
            })
            .collect();
        CandidateRanking::build(candidates)
    }

    async fn claim_after_accept(
        &self,
        notification: &DispatchNotification,
    ) -> Result<ResponseOutcome, DispatchError> {
        match self
            .gateway
            .claim_for(notification.task_id(), notification.helper())
            .await?
        {
            ClaimOutcome::Claimed(task) => {
                info!(
                    task_id = %task.id(),
                    helper = %notification.helper(),
                    "helper accepted and claimed task"
                );
                Ok(ResponseOutcome::Claimed(task))
            }
            ClaimOutcome::Unavailable => {
                debug!(
                    task_id = %notification.task_id(),
                    helper = %notification.helper(),
                    "accept arrived after the task became unavailable"
                );
                Ok(ResponseOutcome::RecordedLate)
            }
        }
    }
}

fn render_message(
    template: &str,
    task: &Task,
    distance_m: u64,
) -> Result<String, DispatchDomainError> {
    let environment = Environment::new();
    let context = build_message_context(task, distance_m);
    environment
        .render_str(template, context)
        .map_err(|error| DispatchDomainError::TemplateRender {
            reason: error.to_string(),
        })
}

fn build_message_context(task: &Task, distance_m: u64) -> Map<String, Value> {
    let mut context = Map::new();
    context.insert("title".to_owned(), Value::String(task.title().to_owned()));
    context.insert(
        "urgency".to_owned(),
        Value::String(task.urgency().as_str().to_owned()),
    );
    context.insert(
        "distance_km".to_owned(),
        Value::String(format_km(distance_m)),
    );
    context.insert("price".to_owned(), Value::from(task.price().rupees()));
    context
}

/// Formats metres as kilometres with one decimal place, truncating.
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "distances render with one truncated decimal of kilometres"
)]
fn format_km(distance_m: u64) -> String {
    format!("{}.{}", distance_m / 1000, (distance_m % 1000) / 100)
}
