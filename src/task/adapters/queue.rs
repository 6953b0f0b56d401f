//! Dispatch queue backed by an unbounded tokio channel.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::task::ports::{DispatchQueue, DispatchQueueError, DispatchRequest};

/// Sender half of an in-process dispatch queue.
///
/// Cloning shares the same channel, so several services can enqueue into
/// one dispatch worker.
#[derive(Debug, Clone)]
pub struct ChannelDispatchQueue {
    sender: mpsc::UnboundedSender<DispatchRequest>,
}

impl ChannelDispatchQueue {
    /// Creates a queue and the receiver a dispatch worker consumes from.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DispatchRequest>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl DispatchQueue for ChannelDispatchQueue {
    async fn enqueue(&self, request: DispatchRequest) -> Result<(), DispatchQueueError> {
        self.sender
            .send(request)
            .map_err(|_| DispatchQueueError::Closed)
    }
}
