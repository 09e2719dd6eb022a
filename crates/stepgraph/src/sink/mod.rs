//! Event sinks
//!
//! This module provides:
//! - [`EventSink`] - where the engine publishes lifecycle events
//! - [`InMemoryEventSink`] and [`NoopEventSink`] - for tests and examples
//! - [`ChannelEventSink`] - streams events to a consumer task

mod channel;
mod memory;
mod traits;

pub use channel::ChannelEventSink;
pub use memory::{InMemoryEventSink, NoopEventSink};
pub use traits::{EventSink, PublishError};
