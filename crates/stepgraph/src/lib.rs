//! # Stepgraph
//!
//! A declaratively configured finite-state workflow engine for domain entities.
//!
//! ## Features
//!
//! - **Declarative graphs**: Each step names its allowed next steps, its validation gates and its lifecycle events
//! - **Gated transitions**: Exit, adjacency and entry checks all run before anything changes, and every failure is reported
//! - **Lifecycle events**: Before/after entering and leaving hooks bind events to the entity and publish them in order
//! - **Step history**: Optional append-only record of previous steps, each with its reason
//! - **Pluggable sinks**: Publish to memory, a tokio channel, or any `EventSink` implementation
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        GraphBuilder                          │
//! │  (declares steps, checks duplicates and dangling edges)     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       WorkflowGraph                          │
//! │  (immutable step -> StepDefinition map, shared via Arc)     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        StepEngine                            │
//! │  (change_step: validate, publish, write via StepAccessor)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         EventSink                            │
//! │  (in-memory, channel, or caller-provided transport)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//!
//! A built graph is read-only and can be shared freely. Transitions on the
//! same entity must not run concurrently: `change_step` reads, checks and
//! writes the entity's step without any locking of its own.
//!
//! ## Example
//!
//! ```
//! use stepgraph::prelude::*;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Status {
//!     Draft,
//!     Published,
//! }
//!
//! struct Post {
//!     status: StepRecord<Status>,
//!     title: String,
//! }
//!
//! fn status(p: &Post) -> &StepRecord<Status> {
//!     &p.status
//! }
//!
//! fn status_mut(p: &mut Post) -> &mut StepRecord<Status> {
//!     &mut p.status
//! }
//!
//! # tokio_test_block(async {
//! let graph = GraphBuilder::<Post, Status, String>::new()
//!     .for_step(Status::Draft, |step| {
//!         step.add_next_steps([Status::Published]);
//!     })
//!     .for_step(Status::Published, |step| {
//!         step.add_entry_validation(|p| !p.title.is_empty(), "Title required")
//!             .add_event_after_entering(|p: &Post| format!("published {}", p.title));
//!     })
//!     .build()
//!     .expect("graph is consistent");
//!
//! let sink = InMemoryEventSink::new();
//! let engine = StepEngine::new(graph, sink.clone());
//! let accessor = FieldAccessor::new(status, status_mut);
//!
//! let mut post = Post {
//!     status: StepRecord::new(Status::Draft),
//!     title: "Hello".into(),
//! };
//!
//! engine
//!     .change_step(&mut post, &accessor, Status::Published, None)
//!     .await
//!     .expect("transition succeeds");
//!
//! assert_eq!(post.status.value, Status::Published);
//! assert_eq!(sink.events(), vec!["published Hello"]);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) {
//! #     tokio::runtime::Builder::new_current_thread()
//! #         .build()
//! #         .expect("runtime")
//! #         .block_on(f);
//! # }
//! ```

pub mod engine;
pub mod graph;
pub mod sink;
pub mod step;
pub mod validation;

/// Prelude for common imports
pub mod prelude {
    pub use crate::engine::{
        EngineConfig, PostValidationPolicy, StepEngine, TransitionError, TransitionOutcome,
    };
    pub use crate::graph::{Flow, GraphBuilder, GraphIntegrityError, WorkflowGraph};
    pub use crate::sink::{
        ChannelEventSink, EventSink, InMemoryEventSink, NoopEventSink, PublishError,
    };
    pub use crate::step::{
        EventTemplate, FieldAccessor, HookPoint, StepAccessor, StepDefinitionBuilder, StepHistory,
        StepRecord, StepValue,
    };
    pub use crate::validation::{ValidationError, ValidationPhase, ValidationResult};
}

// Re-export key types at crate root
pub use engine::{EngineConfig, PostValidationPolicy, StepEngine, TransitionError, TransitionOutcome};
pub use graph::{Flow, GraphBuilder, GraphIntegrityError, WorkflowGraph};
pub use sink::{ChannelEventSink, EventSink, InMemoryEventSink, NoopEventSink, PublishError};
pub use step::{
    EventSpec, EventTemplate, FieldAccessor, FieldHistory, HookPoint, StepAccessor,
    StepDefinition, StepDefinitionBuilder, StepHistory, StepRecord, StepValue,
};
pub use validation::{ValidationError, ValidationPhase, ValidationResult, ValidationSet};
