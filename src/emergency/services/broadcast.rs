//! Emergency broadcast orchestration.
//!
//! Raising an alert opens a pre-filled emergency-tier task through the
//! task registry, which queues it for dispatch like any other task.
//! Everything read back afterwards is a projection: status counts come
//! from the task and its dispatch notifications, responders from the
//! accepted ones.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::dispatch::domain::NotificationResponse;
use crate::dispatch::ports::{
    CandidateSource, CandidateSourceError, NotificationStore, NotificationStoreError,
};
use crate::emergency::domain::{
    AlertStatus, DEFAULT_EMERGENCY_RADIUS_M, EmergencyAlert, EmergencyKind, ResponderSummary,
    eta_minutes,
};
use crate::emergency::ports::{
    AlertStore, AlertStoreError, AlertTaskError, AlertTaskGateway, EmergencyTaskSpec,
};
use crate::geo::GeoPoint;
use crate::identity::domain::{IdentityDomainError, PhoneNumber, UserId};
use crate::task::domain::{TaskId, Urgency, suggest_price};

/// Input for raising an emergency alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAlertRequest {
    requester: UserId,
    kind: EmergencyKind,
    location: GeoPoint,
    address: String,
    contact_phone: String,
    note: Option<String>,
    radius_m: Option<u64>,
    price_rupees: Option<u64>,
}

impl CreateAlertRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        requester: UserId,
        kind: EmergencyKind,
        location: GeoPoint,
        address: impl Into<String>,
        contact_phone: impl Into<String>,
    ) -> Self {
        Self {
            requester,
            kind,
            location,
            address: address.into(),
            contact_phone: contact_phone.into(),
            note: None,
            radius_m: None,
            price_rupees: None,
        }
    }

    /// Adds a free-form note used as the task description.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Overrides the broadcast radius instead of the emergency default.
    #[must_use]
    pub const fn with_radius(mut self, radius_m: u64) -> Self {
        self.radius_m = Some(radius_m);
        self
    }

    /// Overrides the offered price instead of the suggested one.
    #[must_use]
    pub const fn with_price(mut self, price_rupees: u64) -> Self {
        self.price_rupees = Some(price_rupees);
        self
    }
}

/// Convenient result alias for emergency service operations.
pub type EmergencyServiceResult<T> = Result<T, EmergencyServiceError>;

/// Service-level errors for emergency broadcast operations.
#[derive(Debug, Error)]
pub enum EmergencyServiceError {
    /// Input failed domain validation.
    #[error(transparent)]
    Validation(#[from] IdentityDomainError),
    /// No emergency alert exists for the task.
    #[error("no emergency alert for task {0}")]
    NotFound(TaskId),
    /// Opening or reading the backing task failed.
    #[error(transparent)]
    Task(#[from] AlertTaskError),
    /// The alert store failed.
    #[error(transparent)]
    Store(#[from] AlertStoreError),
    /// Reading dispatch notifications failed.
    #[error(transparent)]
    Notifications(#[from] NotificationStoreError),
    /// The helper profile lookup failed.
    #[error(transparent)]
    Candidates(#[from] CandidateSourceError),
}

/// Orchestrates emergency alerts over the task registry and dispatch
/// records.
#[derive(Clone)]
pub struct EmergencyBroadcastService<G, A, N, D, C>
where
    G: AlertTaskGateway,
    A: AlertStore,
    N: NotificationStore,
    D: CandidateSource,
    C: Clock + Send + Sync,
{
    gateway: Arc<G>,
    alerts: Arc<A>,
    notifications: Arc<N>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<G, A, N, D, C> EmergencyBroadcastService<G, A, N, D, C>
where
    G: AlertTaskGateway,
    A: AlertStore,
    N: NotificationStore,
    D: CandidateSource,
    C: Clock + Send + Sync,
{
    /// Creates a service over the given gateway, stores, and clock.
    #[must_use]
    pub const fn new(
        gateway: Arc<G>,
        alerts: Arc<A>,
        notifications: Arc<N>,
        directory: Arc<D>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            gateway,
            alerts,
            notifications,
            directory,
            clock,
        }
    }

    /// Raises an emergency alert, opening its backing task.
    ///
    /// The task is pre-filled from the kind: default title, emergency
    /// category and urgency, the suggested emergency price unless
    /// overridden, and the emergency broadcast radius unless overridden.
    ///
    /// # Errors
    ///
    /// Returns [`EmergencyServiceError::Validation`] for a malformed
    /// contact phone, [`EmergencyServiceError::Task`] when the registry
    /// rejects the task, and [`EmergencyServiceError::Store`] when the
    /// alert cannot be persisted.
    pub async fn create_alert(
        &self,
        request: CreateAlertRequest,
    ) -> EmergencyServiceResult<EmergencyAlert> {
        let contact_phone = PhoneNumber::new(request.contact_phone)?;
        let radius_m = request.radius_m.unwrap_or(DEFAULT_EMERGENCY_RADIUS_M);
        let price_rupees = request
            .price_rupees
            .unwrap_or_else(|| suggest_price(0, Urgency::Emergency).total_rupees());
        let description = request
            .note
            .filter(|note| !note.trim().is_empty())
            .unwrap_or_else(|| {
                format!("Emergency reported nearby. Call {contact_phone} to coordinate.")
            });

        let spec = EmergencyTaskSpec {
            requester: request.requester,
            title: request.kind.default_title().to_owned(),
            description,
            location: request.location,
            address: request.address,
            price_rupees,
            radius_m,
        };
        let task = self.gateway.open_emergency_task(spec).await?;

        let alert = EmergencyAlert::raise(
            task.id(),
            request.kind,
            contact_phone,
            radius_m,
            &*self.clock,
        );
        self.alerts.insert(&alert).await?;
        info!(
            task_id = %alert.task_id(),
            kind = %alert.kind(),
            priority = %alert.priority(),
            radius_m,
            "emergency alert raised"
        );
        Ok(alert)
    }

    /// Fetches the alert raised for a task.
    ///
    /// # Errors
    ///
    /// Returns [`EmergencyServiceError::NotFound`] when the task has no
    /// alert.
    pub async fn alert(&self, task_id: TaskId) -> EmergencyServiceResult<EmergencyAlert> {
        self.alerts
            .find_by_task(task_id)
            .await?
            .ok_or(EmergencyServiceError::NotFound(task_id))
    }

    /// Projects the alert's progress from its task and notifications.
    ///
    /// # Errors
    ///
    /// Returns [`EmergencyServiceError::NotFound`] when the task has no
    /// alert or no longer exists.
    pub async fn alert_status(&self, task_id: TaskId) -> EmergencyServiceResult<AlertStatus> {
        self.alert(task_id).await?;
        let task = self
            .gateway
            .load(task_id)
            .await?
            .ok_or(EmergencyServiceError::NotFound(task_id))?;
        let notifications = self.notifications.list_for_task(task_id).await?;

        let responded = notifications
            .iter()
            .filter(|notification| {
                matches!(
                    notification.response(),
                    NotificationResponse::Accepted | NotificationResponse::Declined
                )
            })
            .count();
        let en_route = notifications
            .iter()
            .filter(|notification| notification.response() == NotificationResponse::Accepted)
            .count();
        Ok(AlertStatus {
            task_status: task.status(),
            notified: notifications.len(),
            responded,
            en_route,
        })
    }

    /// Lists helpers who accepted the alert, nearest first.
    ///
    /// Trust scores come from the helper directory at call time; a
    /// responder no longer listed there reads as zero trust.
    ///
    /// # Errors
    ///
    /// Returns [`EmergencyServiceError::NotFound`] when the task has no
    /// alert and [`EmergencyServiceError::Candidates`] when the directory
    /// lookup fails.
    pub async fn responders(
        &self,
        task_id: TaskId,
    ) -> EmergencyServiceResult<Vec<ResponderSummary>> {
        self.alert(task_id).await?;
        let notifications = self.notifications.list_for_task(task_id).await?;
        let trust_scores: HashMap<UserId, u8> = self
            .directory
            .helper_profiles()
            .await?
            .into_iter()
            .map(|profile| (profile.user_id, profile.trust_score))
            .collect();

        let mut responders: Vec<ResponderSummary> = notifications
            .iter()
            .filter(|notification| notification.response() == NotificationResponse::Accepted)
            .map(|notification| ResponderSummary {
                helper: notification.helper(),
                distance_m: notification.distance_m(),
                trust_score: trust_scores
                    .get(&notification.helper())
                    .copied()
                    .unwrap_or(0),
                eta_minutes: eta_minutes(notification.distance_m()),
            })
            .collect();
        responders.sort_by(|left, right| {
            left.distance_m
                .cmp(&right.distance_m)
                .then_with(|| left.helper.cmp(&right.helper))
        });
        Ok(responders)
    }
}
