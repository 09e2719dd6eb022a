//! Immutable step graph

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::step::{StepDefinition, StepValue};

/// Adjacency snapshot for one step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flow<S> {
    /// Source step
    pub from: S,

    /// Legal next steps
    pub to: Vec<S>,
}

/// Mapping from step value to its definition
///
/// Built once through [`GraphBuilder`](super::GraphBuilder) and never mutated
/// afterwards, so a graph can be shared across any number of concurrent
/// transitions without synchronization.
pub struct WorkflowGraph<E, S, V> {
    steps: HashMap<S, StepDefinition<E, S, V>>,
    order: Vec<S>,
}

impl<E, S: StepValue, V> WorkflowGraph<E, S, V> {
    pub(crate) fn from_parts(steps: HashMap<S, StepDefinition<E, S, V>>, order: Vec<S>) -> Self {
        Self { steps, order }
    }

    /// Get the definition of a step
    pub fn step(&self, step: &S) -> Option<&StepDefinition<E, S, V>> {
        self.steps.get(step)
    }

    /// Check if a step is defined
    pub fn contains(&self, step: &S) -> bool {
        self.steps.contains_key(step)
    }

    /// Get the number of defined steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the graph has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Defined step values in declaration order
    pub fn steps(&self) -> impl Iterator<Item = &S> {
        self.order.iter()
    }

    /// Legal next steps of a step, if it is defined
    pub fn next_steps(&self, step: &S) -> Option<&[S]> {
        self.steps.get(step).map(StepDefinition::next_steps)
    }

    /// Whether `from -> to` is a declared edge
    pub fn can_transition(&self, from: &S, to: &S) -> bool {
        self.steps.get(from).is_some_and(|d| d.allows(to))
    }

    /// Snapshot of every step and its next steps, in declaration order
    pub fn get_flow(&self) -> Vec<Flow<S>> {
        self.steps()
            .filter_map(|step| {
                self.steps.get(step).map(|definition| Flow {
                    from: step.clone(),
                    to: definition.next_steps().to_vec(),
                })
            })
            .collect()
    }
}

impl<E, S: fmt::Debug, V> fmt::Debug for WorkflowGraph<E, S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowGraph")
            .field("steps", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::super::GraphBuilder;
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    enum Phase {
        Draft,
        Review,
        Published,
    }

    fn graph() -> WorkflowGraph<(), Phase, ()> {
        GraphBuilder::new()
            .for_step(Phase::Draft, |step| {
                step.add_next_steps([Phase::Review]);
            })
            .for_step(Phase::Review, |step| {
                step.add_next_steps([Phase::Draft, Phase::Published]);
            })
            .for_step(Phase::Published, |_| {})
            .build()
            .expect("graph should build")
    }

    #[test]
    fn test_lookup() {
        let graph = graph();

        assert_eq!(graph.len(), 3);
        assert!(!graph.is_empty());
        assert!(graph.contains(&Phase::Review));
        assert!(graph.step(&Phase::Published).is_some());
        assert_eq!(graph.next_steps(&Phase::Published), Some(&[][..]));
        assert_eq!(
            graph.steps().copied().collect::<Vec<_>>(),
            vec![Phase::Draft, Phase::Review, Phase::Published]
        );
    }

    #[test]
    fn test_can_transition() {
        let graph = graph();

        assert!(graph.can_transition(&Phase::Draft, &Phase::Review));
        assert!(graph.can_transition(&Phase::Review, &Phase::Draft));
        assert!(!graph.can_transition(&Phase::Draft, &Phase::Published));
        assert!(!graph.can_transition(&Phase::Published, &Phase::Draft));
    }

    #[test]
    fn test_get_flow_in_declaration_order() {
        let flow = graph().get_flow();

        assert_eq!(
            flow,
            vec![
                Flow {
                    from: Phase::Draft,
                    to: vec![Phase::Review]
                },
                Flow {
                    from: Phase::Review,
                    to: vec![Phase::Draft, Phase::Published]
                },
                Flow {
                    from: Phase::Published,
                    to: vec![]
                },
            ]
        );
    }

    #[test]
    fn test_flow_serialization() {
        let flow = graph().get_flow();
        let json = serde_json::to_value(&flow).unwrap();

        assert_eq!(
            json[1],
            serde_json::json!({ "from": "Review", "to": ["Draft", "Published"] })
        );
    }

    #[test]
    fn test_graph_debug() {
        let debug_str = format!("{:?}", graph());
        assert!(debug_str.contains("Draft"));
        assert!(debug_str.contains("Published"));
    }
}
