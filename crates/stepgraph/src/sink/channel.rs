//! Channel-backed EventSink for streaming events to a consumer task

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{EventSink, PublishError};

/// Event sink that forwards events into a bounded tokio channel
///
/// `publish` waits for channel capacity, which gives hooks natural
/// backpressure. Once the receiver is dropped every publish fails with
/// [`PublishError::Closed`].
#[derive(Debug, Clone)]
pub struct ChannelEventSink<V> {
    sender: mpsc::Sender<V>,
}

impl<V> ChannelEventSink<V> {
    /// Wrap an existing sender
    pub fn new(sender: mpsc::Sender<V>) -> Self {
        Self { sender }
    }

    /// Create a sink and the receiver that drains it
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<V>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self::new(sender), receiver)
    }
}

#[async_trait]
impl<V: Send + 'static> EventSink<V> for ChannelEventSink<V> {
    async fn publish(&self, event: V) -> Result<(), PublishError> {
        self.sender
            .send(event)
            .await
            .map_err(|_| PublishError::Closed)
    }
}
