//! Step definitions and their builder

use std::fmt;
use std::sync::Arc;

use super::{EventSpec, EventTemplate, HookPoint};
use crate::validation::ValidationSet;

/// Declared rules for one step value
///
/// Holds the legal next steps, the four validation sets and the four ordered
/// hook lists. Definitions are produced by [`StepDefinitionBuilder`] and are
/// read-only once the graph is built.
pub struct StepDefinition<E, S, V> {
    next_steps: Vec<S>,
    entry_validations: ValidationSet<E>,
    exit_validations: ValidationSet<E>,
    post_entry_validations: ValidationSet<E>,
    post_exit_validations: ValidationSet<E>,
    before_entering: Vec<EventSpec<E, V>>,
    after_entering: Vec<EventSpec<E, V>>,
    before_leaving: Vec<EventSpec<E, V>>,
    after_leaving: Vec<EventSpec<E, V>>,
}

impl<E, S, V> StepDefinition<E, S, V> {
    fn empty() -> Self {
        Self {
            next_steps: Vec::new(),
            entry_validations: ValidationSet::new(),
            exit_validations: ValidationSet::new(),
            post_entry_validations: ValidationSet::new(),
            post_exit_validations: ValidationSet::new(),
            before_entering: Vec::new(),
            after_entering: Vec::new(),
            before_leaving: Vec::new(),
            after_leaving: Vec::new(),
        }
    }

    /// Legal next steps, in declaration order without duplicates
    pub fn next_steps(&self) -> &[S] {
        &self.next_steps
    }

    /// Checks that must hold to enter this step
    pub fn entry_validations(&self) -> &ValidationSet<E> {
        &self.entry_validations
    }

    /// Checks that must hold to leave this step
    pub fn exit_validations(&self) -> &ValidationSet<E> {
        &self.exit_validations
    }

    /// Checks run after the entity entered this step
    pub fn post_entry_validations(&self) -> &ValidationSet<E> {
        &self.post_entry_validations
    }

    /// Checks run after the entity left this step
    pub fn post_exit_validations(&self) -> &ValidationSet<E> {
        &self.post_exit_validations
    }

    /// Event templates declared for a hook point
    pub fn hooks(&self, hook: HookPoint) -> &[EventSpec<E, V>] {
        match hook {
            HookPoint::BeforeEntering => &self.before_entering,
            HookPoint::AfterEntering => &self.after_entering,
            HookPoint::BeforeLeaving => &self.before_leaving,
            HookPoint::AfterLeaving => &self.after_leaving,
        }
    }
}

impl<E, S: PartialEq, V> StepDefinition<E, S, V> {
    /// Whether `step` is a legal next step
    pub fn allows(&self, step: &S) -> bool {
        self.next_steps.contains(step)
    }
}

impl<E, S: fmt::Debug, V> fmt::Debug for StepDefinition<E, S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("next_steps", &self.next_steps)
            .field("entry_validations", &self.entry_validations)
            .field("exit_validations", &self.exit_validations)
            .field("post_entry_validations", &self.post_entry_validations)
            .field("post_exit_validations", &self.post_exit_validations)
            .field("before_entering", &self.before_entering.len())
            .field("after_entering", &self.after_entering.len())
            .field("before_leaving", &self.before_leaving.len())
            .field("after_leaving", &self.after_leaving.len())
            .finish()
    }
}

/// Fluent assembly of a [`StepDefinition`]
///
/// Handed to the configure closure of
/// [`GraphBuilder::for_step`](crate::graph::GraphBuilder::for_step). Every call
/// appends to the matching ordered list.
///
/// ```ignore
/// builder.for_step(Status::Shipped, |step| {
///     step.add_next_steps([Status::Received, Status::NotDelivered])
///         .add_exit_validation(|o: &Order| o.paid, "Order not paid")
///         .add_event_before_entering(|o: &Order| OrderEvent::shipping(o));
/// })
/// ```
pub struct StepDefinitionBuilder<E, S, V> {
    definition: StepDefinition<E, S, V>,
}

impl<E, S: PartialEq, V> StepDefinitionBuilder<E, S, V> {
    pub(crate) fn new() -> Self {
        Self {
            definition: StepDefinition::empty(),
        }
    }

    pub(crate) fn build(self) -> StepDefinition<E, S, V> {
        self.definition
    }

    /// Declare legal next steps. Steps already declared are ignored.
    pub fn add_next_steps<I>(&mut self, steps: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
    {
        for step in steps {
            if !self.definition.next_steps.contains(&step) {
                self.definition.next_steps.push(step);
            }
        }
        self
    }

    /// Condition that must hold for an entity to enter this step
    pub fn add_entry_validation<F>(&mut self, predicate: F, message: impl Into<String>) -> &mut Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.definition.entry_validations.add(predicate, message);
        self
    }

    /// Condition that must hold before an entity leaves this step
    pub fn add_exit_validation<F>(&mut self, predicate: F, message: impl Into<String>) -> &mut Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.definition.exit_validations.add(predicate, message);
        self
    }

    /// Condition checked after an entity switched into this step
    pub fn add_post_entry_validation<F>(
        &mut self,
        predicate: F,
        message: impl Into<String>,
    ) -> &mut Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.definition.post_entry_validations.add(predicate, message);
        self
    }

    /// Condition checked after an entity switched out of this step
    pub fn add_post_exit_validation<F>(
        &mut self,
        predicate: F,
        message: impl Into<String>,
    ) -> &mut Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.definition.post_exit_validations.add(predicate, message);
        self
    }

    /// Event published before an entity enters this step
    pub fn add_event_before_entering<T>(&mut self, template: T) -> &mut Self
    where
        T: EventTemplate<E, V> + 'static,
    {
        self.definition.before_entering.push(Arc::new(template));
        self
    }

    /// Event published after an entity entered this step
    pub fn add_event_after_entering<T>(&mut self, template: T) -> &mut Self
    where
        T: EventTemplate<E, V> + 'static,
    {
        self.definition.after_entering.push(Arc::new(template));
        self
    }

    /// Event published before an entity leaves this step
    pub fn add_event_before_leaving<T>(&mut self, template: T) -> &mut Self
    where
        T: EventTemplate<E, V> + 'static,
    {
        self.definition.before_leaving.push(Arc::new(template));
        self
    }

    /// Event published after an entity left this step
    pub fn add_event_after_leaving<T>(&mut self, template: T) -> &mut Self
    where
        T: EventTemplate<E, V> + 'static,
    {
        self.definition.after_leaving.push(Arc::new(template));
        self
    }
}
