//! In-memory implementations of EventSink for testing and examples

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{EventSink, PublishError};

/// In-memory event sink
///
/// Records every published event in order. Clones share the same buffer, so
/// a test can hand one clone to the engine and inspect another.
///
/// # Example
///
/// ```
/// use stepgraph::InMemoryEventSink;
///
/// let sink = InMemoryEventSink::<String>::new();
/// assert!(sink.is_empty());
/// ```
#[derive(Debug)]
pub struct InMemoryEventSink<V> {
    events: Arc<Mutex<Vec<V>>>,
    reject_after: Option<usize>,
}

impl<V> InMemoryEventSink<V> {
    /// Create a new in-memory sink
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            reject_after: None,
        }
    }

    /// Accept `limit` events, then reject every further publish
    pub fn rejecting_after(limit: usize) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            reject_after: Some(limit),
        }
    }

    /// Get the number of recorded events
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Remove and return all recorded events
    pub fn take(&self) -> Vec<V> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl<V: Clone> InMemoryEventSink<V> {
    /// Get a copy of all recorded events
    pub fn events(&self) -> Vec<V> {
        self.events.lock().clone()
    }
}

impl<V> Default for InMemoryEventSink<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for InMemoryEventSink<V> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
            reject_after: self.reject_after,
        }
    }
}

#[async_trait]
impl<V: Send + 'static> EventSink<V> for InMemoryEventSink<V> {
    async fn publish(&self, event: V) -> Result<(), PublishError> {
        let mut events = self.events.lock();
        if let Some(limit) = self.reject_after {
            if events.len() >= limit {
                return Err(PublishError::rejected(format!(
                    "sink accepts at most {limit} events"
                )));
            }
        }
        events.push(event);
        Ok(())
    }
}

/// Event sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventSink;

#[async_trait]
impl<V: Send + 'static> EventSink<V> for NoopEventSink {
    async fn publish(&self, _event: V) -> Result<(), PublishError> {
        Ok(())
    }
}
