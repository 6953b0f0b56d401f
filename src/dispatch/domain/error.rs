//! Domain errors for dispatch operations.

use super::{NotificationId, NotificationResponse};
use thiserror::Error;

/// Errors raised by dispatch domain rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchDomainError {
    /// The notification already carries a final response.
    #[error("notification {notification_id} already resolved as {response}")]
    AlreadyResolved {
        /// Identifier of the notification.
        notification_id: NotificationId,
        /// Response already recorded.
        response: NotificationResponse,
    },
    /// The notification message template failed to render.
    #[error("message template failed to render: {reason}")]
    TemplateRender {
        /// Renderer diagnostic.
        reason: String,
    },
}
