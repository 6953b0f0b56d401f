//! Background expiry of overdue dispatch notifications.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::dispatch::ports::{NotificationStore, NotificationStoreError};
use mockable::Clock;
use tracing::{debug, info, warn};

/// Default delay between expiry sweeps.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Periodically expires pending notifications past their deadline.
///
/// Expiry races against late replies through the store's version check, so
/// a reply that lands mid-sweep wins and the sweeper skips the record.
pub struct NotificationSweeper<N, C>
where
    N: NotificationStore,
    C: Clock + Send + Sync,
{
    store: Arc<N>,
    clock: Arc<C>,
    poll_interval: Duration,
    shutdown: Arc<AtomicBool>,
}

impl<N, C> NotificationSweeper<N, C>
where
    N: NotificationStore,
    C: Clock + Send + Sync,
{
    /// Creates a sweeper with the default poll interval.
    #[must_use]
    pub fn new(store: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            poll_interval: DEFAULT_POLL_INTERVAL,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Overrides the delay between sweeps.
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Returns a handle for requesting shutdown.
    #[must_use]
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Runs sweeps until shutdown is requested.
    pub async fn run(self) {
        info!(
            poll_interval_secs = self.poll_interval.as_secs(),
            "notification sweeper started"
        );
        while !self.shutdown.load(Ordering::Relaxed) {
            match self.sweep_once().await {
                Ok(0) => {}
                Ok(expired) => debug!(expired, "expired overdue notifications"),
                Err(err) => warn!(error = %err, "notification sweep failed"),
            }
            tokio::time::sleep(self.poll_interval).await;
        }
        info!("notification sweeper stopped");
    }

    /// Expires every pending notification past its deadline.
    ///
    /// Returns how many notifications were expired. Records resolved
    /// between listing and write-back are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationStoreError`] when listing or writing back
    /// fails for reasons other than a version conflict.
    pub async fn sweep_once(&self) -> Result<usize, NotificationStoreError> {
        let now = self.clock.utc();
        let due = self.store.list_due(now).await?;
        let mut expired = 0usize;
        for mut notification in due {
            let expected = notification.version();
            if notification.expire().is_err() {
                continue;
            }
            match self.store.update(&notification, expected).await {
                Ok(()) => expired = expired.saturating_add(1),
                Err(NotificationStoreError::VersionConflict { .. }) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(expired)
    }
}
