//! Graph assembly and integrity checks

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use super::WorkflowGraph;
use crate::step::{StepDefinition, StepDefinitionBuilder, StepValue};

/// Errors detected when finalizing a graph
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphIntegrityError {
    /// The same step value was configured more than once
    #[error("step {step} is defined more than once")]
    DuplicateStep { step: String },

    /// A next step refers to a step value with no definition
    #[error("step {from} declares next step {to}, which has no definition")]
    DanglingNextStep { from: String, to: String },
}

/// Fluent builder for a [`WorkflowGraph`]
///
/// # Example
///
/// ```
/// use stepgraph::GraphBuilder;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Status { Open, Closed }
///
/// struct Ticket { resolved: bool }
///
/// let graph = GraphBuilder::<Ticket, Status, String>::new()
///     .for_step(Status::Open, |step| {
///         step.add_next_steps([Status::Closed])
///             .add_exit_validation(|t| t.resolved, "Ticket not resolved");
///     })
///     .for_step(Status::Closed, |_| {})
///     .build()
///     .unwrap();
///
/// assert!(graph.can_transition(&Status::Open, &Status::Closed));
/// ```
pub struct GraphBuilder<E, S, V> {
    steps: Vec<(S, StepDefinition<E, S, V>)>,
}

impl<E, S: StepValue, V> Default for GraphBuilder<E, S, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, S: StepValue, V> GraphBuilder<E, S, V> {
    /// Create an empty builder
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Configure one step value
    ///
    /// Call once per step value; a second call for the same value makes
    /// [`build`](Self::build) fail.
    pub fn for_step<F>(mut self, step: S, configure: F) -> Self
    where
        F: FnOnce(&mut StepDefinitionBuilder<E, S, V>),
    {
        let mut builder = StepDefinitionBuilder::new();
        configure(&mut builder);
        self.steps.push((step, builder.build()));
        self
    }

    /// Finalize the graph
    ///
    /// Fails on the first duplicate step value, then on the first next step
    /// without a definition, both in declaration order.
    pub fn build(self) -> Result<WorkflowGraph<E, S, V>, GraphIntegrityError> {
        let mut order = Vec::with_capacity(self.steps.len());
        let mut steps: HashMap<S, StepDefinition<E, S, V>> =
            HashMap::with_capacity(self.steps.len());

        for (step, definition) in self.steps {
            if steps.contains_key(&step) {
                return Err(GraphIntegrityError::DuplicateStep {
                    step: label(&step),
                });
            }
            order.push(step.clone());
            steps.insert(step, definition);
        }

        for from in &order {
            let Some(definition) = steps.get(from) else {
                continue;
            };
            if let Some(to) = definition
                .next_steps()
                .iter()
                .find(|next| !steps.contains_key(*next))
            {
                return Err(GraphIntegrityError::DanglingNextStep {
                    from: label(from),
                    to: label(to),
                });
            }
        }

        debug!(steps = order.len(), "built workflow graph");

        Ok(WorkflowGraph::from_parts(steps, order))
    }
}

impl<E, S: fmt::Debug, V> fmt::Debug for GraphBuilder<E, S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphBuilder")
            .field(
                "steps",
                &self.steps.iter().map(|(s, _)| s).collect::<Vec<_>>(),
            )
            .finish()
    }
}

pub(crate) fn label<S: fmt::Debug>(step: &S) -> String {
    format!("{step:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Step {
        A,
        B,
        C,
    }

    type Builder = GraphBuilder<(), Step, ()>;

    #[test]
    fn test_duplicate_step_rejected() {
        let result = Builder::new()
            .for_step(Step::A, |step| {
                step.add_next_steps([Step::B]);
            })
            .for_step(Step::B, |_| {})
            .for_step(Step::A, |step| {
                step.add_next_steps([Step::A]);
            })
            .build();

        assert_eq!(
            result.unwrap_err(),
            GraphIntegrityError::DuplicateStep {
                step: "A".to_string()
            }
        );
    }

    #[test]
    fn test_dangling_next_step_rejected() {
        let result = Builder::new()
            .for_step(Step::A, |step| {
                step.add_next_steps([Step::B, Step::C]);
            })
            .for_step(Step::B, |_| {})
            .build();

        let err = result.unwrap_err();
        assert_eq!(
            err,
            GraphIntegrityError::DanglingNextStep {
                from: "A".to_string(),
                to: "C".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "step A declares next step C, which has no definition"
        );
    }

    #[test]
    fn test_self_loop_is_not_dangling() {
        let graph = Builder::new()
            .for_step(Step::A, |step| {
                step.add_next_steps([Step::A]);
            })
            .build()
            .unwrap();

        assert!(graph.can_transition(&Step::A, &Step::A));
    }

    #[test]
    fn test_empty_graph_builds() {
        let graph = Builder::default().build().unwrap();
        assert!(graph.is_empty());
        assert!(graph.get_flow().is_empty());
    }

    #[test]
    fn test_builder_debug() {
        let builder = Builder::new().for_step(Step::C, |_| {});
        assert!(format!("{:?}", builder).contains('C'));
    }
}
