//! EventSink trait definition

use std::sync::Arc;

use async_trait::async_trait;

/// Error type for publish operations
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The sink can no longer accept events
    #[error("event sink closed")]
    Closed,

    /// The sink refused this event
    #[error("event rejected: {0}")]
    Rejected(String),

    /// Failure from an underlying transport
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PublishError {
    /// Create a rejection error
    pub fn rejected(msg: impl Into<String>) -> Self {
        PublishError::Rejected(msg.into())
    }
}

/// Destination for lifecycle events
///
/// Implementations can:
/// - Forward events to a message bus
/// - Send events to a channel for streaming
/// - Collect events in memory for testing
/// - Do nothing (no-op implementation)
///
/// The engine awaits every publish before starting the next one and treats
/// any error as fatal to the transition in progress.
#[async_trait]
pub trait EventSink<V: Send + 'static>: Send + Sync {
    /// Publish a single event
    async fn publish(&self, event: V) -> Result<(), PublishError>;
}

#[async_trait]
impl<V, T> EventSink<V> for Arc<T>
where
    V: Send + 'static,
    T: EventSink<V> + ?Sized,
{
    async fn publish(&self, event: V) -> Result<(), PublishError> {
        (**self).publish(event).await
    }
}
