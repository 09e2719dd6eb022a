//! Workflow graph
//!
//! The graph maps every step value to its [`StepDefinition`](crate::step::StepDefinition).
//! It is assembled once with [`GraphBuilder`], checked for duplicate and
//! dangling steps, and read-only from then on.

mod builder;
mod workflow_graph;

pub use builder::{GraphBuilder, GraphIntegrityError};
pub use workflow_graph::{Flow, WorkflowGraph};

pub(crate) use builder::label;
