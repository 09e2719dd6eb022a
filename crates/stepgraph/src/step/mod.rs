//! Step primitives
//!
//! This module contains the per-step building blocks:
//! - [`StepValue`] and [`StepRecord`] for the entity's current step
//! - [`StepAccessor`] and [`StepHistory`] for reading and writing that step, and
//!   the history of earlier steps, on a caller-owned entity
//! - [`EventTemplate`] and [`HookPoint`] for lifecycle events
//! - [`StepDefinition`] and its builder

mod accessor;
mod definition;
mod event;
mod record;

pub use accessor::{FieldAccessor, FieldHistory, StepAccessor, StepHistory};
pub use definition::{StepDefinition, StepDefinitionBuilder};
pub use event::{EventSpec, EventTemplate, HookPoint};
pub use record::{StepRecord, StepValue};
