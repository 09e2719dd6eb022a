//! Transition engine
//!
//! The engine module provides the `StepEngine` which moves entities between
//! steps of a `WorkflowGraph`, running validations and publishing hook events.

mod config;
mod executor;

pub use config::{EngineConfig, PostValidationPolicy};
pub use executor::{StepEngine, TransitionError, TransitionOutcome};
