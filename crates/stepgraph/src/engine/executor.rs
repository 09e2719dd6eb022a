//! Step transition executor
//!
//! The `StepEngine` runs the transition protocol against a caller-owned entity:
//! - Idempotent short-circuit when the requested step is the current one
//! - Pre-phase validation (exit checks, adjacency, entry checks)
//! - Before-hooks, history append, record replacement
//! - Post-phase validation under the configured policy
//! - After-hooks

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use super::{EngineConfig, PostValidationPolicy};
use crate::graph::{label, WorkflowGraph};
use crate::sink::{EventSink, PublishError};
use crate::step::{HookPoint, StepAccessor, StepDefinition, StepRecord, StepValue};
use crate::validation::{ValidationError, ValidationPhase, ValidationResult};

/// Errors from a transition attempt
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    /// The current or requested step has no definition in the graph
    #[error("unknown step: {0}")]
    UnknownStep(String),

    /// Pre- or post-phase validation failed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A hook's event could not be published
    #[error("failed to publish {hook} event for step {step}: {source}")]
    EventPublish {
        hook: HookPoint,
        step: String,
        #[source]
        source: PublishError,
    },
}

impl TransitionError {
    /// The validation failure, if this is one
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Result of a successful `change_step` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome<S> {
    /// The entity was already in the requested step; nothing ran
    Unchanged { step: S },

    /// The entity moved from one step to another
    Transitioned {
        from: S,
        to: S,
        /// Whether the prior record was appended to the history
        history_appended: bool,
    },
}

impl<S> TransitionOutcome<S> {
    /// Whether the step actually changed
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }

    /// The step the entity is in after the call
    pub fn current(&self) -> &S {
        match self {
            Self::Unchanged { step } => step,
            Self::Transitioned { to, .. } => to,
        }
    }
}

/// Step transition executor
///
/// Holds a shared, immutable [`WorkflowGraph`] and the [`EventSink`] hooks
/// publish to. One engine serves any number of entities.
///
/// # Concurrency
///
/// The graph needs no locking. The entity does: `change_step` performs an
/// unguarded read-modify-write of the step field and the history, so callers
/// must serialize transitions per entity. Within one process `&mut E`
/// enforces this; across processes it is the caller's responsibility.
///
/// There is no built-in timeout or cancellation. Wrap the call if needed.
///
/// # Example
///
/// ```ignore
/// let engine = StepEngine::new(graph, InMemoryEventSink::new());
/// let accessor = FieldAccessor::new(status, status_mut).with_history(history);
///
/// engine
///     .change_step(&mut order, &accessor, Status::Handling, Some("picked"))
///     .await?;
/// ```
pub struct StepEngine<E, S, V, K: ?Sized> {
    graph: Arc<WorkflowGraph<E, S, V>>,
    sink: Arc<K>,
    config: EngineConfig,
}

impl<E, S, V, K> StepEngine<E, S, V, K>
where
    S: StepValue,
    V: Send + 'static,
    K: EventSink<V>,
{
    /// Create a new engine with default config
    pub fn new(graph: WorkflowGraph<E, S, V>, sink: K) -> Self {
        Self::with_arcs(Arc::new(graph), Arc::new(sink))
    }
}

impl<E, S, V, K> StepEngine<E, S, V, K>
where
    S: StepValue,
    V: Send + 'static,
    K: EventSink<V> + ?Sized,
{
    /// Create a new engine from shared components
    pub fn with_arcs(graph: Arc<WorkflowGraph<E, S, V>>, sink: Arc<K>) -> Self {
        Self {
            graph,
            sink,
            config: EngineConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the graph
    pub fn graph(&self) -> &WorkflowGraph<E, S, V> {
        &self.graph
    }

    /// Get the event sink
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Get the configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Move `entity` to `requested`, running the full transition protocol
    ///
    /// Order of operations:
    /// 1. Requested equals current: return [`TransitionOutcome::Unchanged`].
    ///    No checks, no events, no writes.
    /// 2. Resolve both step definitions ([`TransitionError::UnknownStep`]).
    /// 3. Pre-phase: current step's exit checks, the adjacency check, then the
    ///    requested step's entry checks. Every check runs; any failure aborts
    ///    with nothing changed.
    /// 4. Before-hooks: requested step's before-entering, then current step's
    ///    before-leaving, each publish awaited in turn.
    /// 5. Append the prior record to the history (if tracked), then write a
    ///    fresh record for `requested` with `reason`.
    /// 6. Post-phase: current step's post-exit checks, then the requested
    ///    step's post-entry checks, handled per [`PostValidationPolicy`].
    /// 7. After-hooks: after-entering, then after-leaving.
    ///
    /// A publish failure stops the transition where it happens. During
    /// before-hooks the entity is untouched; during after-hooks the new
    /// record stays applied.
    #[instrument(skip(self, entity, accessor))]
    pub async fn change_step<A>(
        &self,
        entity: &mut E,
        accessor: &A,
        requested: S,
        reason: Option<&str>,
    ) -> Result<TransitionOutcome<S>, TransitionError>
    where
        A: StepAccessor<E, S> + ?Sized,
    {
        let prior = accessor.get(entity);
        let current = prior.value.clone();

        if current == requested {
            debug!(step = ?current, "already in requested step");
            return Ok(TransitionOutcome::Unchanged { step: current });
        }

        let current_def = self.definition(&current)?;
        let next_def = self.definition(&requested)?;
        let from = label(&current);
        let to = label(&requested);

        // Pre-phase
        let mut results = Vec::with_capacity(
            current_def.exit_validations().len() + 1 + next_def.entry_validations().len(),
        );
        current_def
            .exit_validations()
            .evaluate_into(entity, &mut results);
        results.push(ValidationResult::check(
            current_def.allows(&requested),
            &format!("invalid step change: [{from}] -> [{to}]"),
        ));
        next_def
            .entry_validations()
            .evaluate_into(entity, &mut results);

        let failures = failed(results);
        if !failures.is_empty() {
            warn!(%from, %to, failed = failures.len(), "pre-validation rejected step change");
            return Err(ValidationError {
                phase: ValidationPhase::Pre,
                from,
                to,
                failures,
                committed: false,
            }
            .into());
        }

        self.fire(entity, next_def, HookPoint::BeforeEntering, &requested)
            .await?;
        self.fire(entity, current_def, HookPoint::BeforeLeaving, &current)
            .await?;

        let history = accessor.history();
        let history_appended = history.is_some();
        if let Some(history) = history {
            history.append(entity, prior.clone());
        }
        accessor.set(entity, StepRecord::successor(requested.clone(), reason));

        // Post-phase
        let mut results = Vec::with_capacity(
            current_def.post_exit_validations().len() + next_def.post_entry_validations().len(),
        );
        current_def
            .post_exit_validations()
            .evaluate_into(entity, &mut results);
        next_def
            .post_entry_validations()
            .evaluate_into(entity, &mut results);

        let failures = failed(results);
        if !failures.is_empty() {
            let committed = match self.config.post_validation {
                PostValidationPolicy::Advisory => true,
                PostValidationPolicy::Rollback => !roll_back(entity, accessor, prior),
            };
            warn!(
                %from,
                %to,
                failed = failures.len(),
                committed,
                "post-validation rejected step change"
            );
            return Err(ValidationError {
                phase: ValidationPhase::Post,
                from,
                to,
                failures,
                committed,
            }
            .into());
        }

        self.fire(entity, next_def, HookPoint::AfterEntering, &requested)
            .await?;
        self.fire(entity, current_def, HookPoint::AfterLeaving, &current)
            .await?;

        info!(%from, %to, history_appended, "step changed");

        Ok(TransitionOutcome::Transitioned {
            from: current,
            to: requested,
            history_appended,
        })
    }

    fn definition(&self, step: &S) -> Result<&StepDefinition<E, S, V>, TransitionError> {
        self.graph
            .step(step)
            .ok_or_else(|| TransitionError::UnknownStep(label(step)))
    }

    /// Publish every hook of one kind, strictly in declaration order
    async fn fire(
        &self,
        entity: &E,
        definition: &StepDefinition<E, S, V>,
        hook: HookPoint,
        step: &S,
    ) -> Result<(), TransitionError> {
        for template in definition.hooks(hook) {
            let event = template.bind(entity);
            if let Err(source) = self.sink.publish(event).await {
                error!(%hook, step = ?step, error = %source, "event publish failed");
                return Err(TransitionError::EventPublish {
                    hook,
                    step: label(step),
                    source,
                });
            }
        }
        Ok(())
    }
}

impl<E, S, V, K: ?Sized> Clone for StepEngine<E, S, V, K> {
    fn clone(&self) -> Self {
        Self {
            graph: Arc::clone(&self.graph),
            sink: Arc::clone(&self.sink),
            config: self.config.clone(),
        }
    }
}

impl<E, S: fmt::Debug, V, K: ?Sized> fmt::Debug for StepEngine<E, S, V, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepEngine")
            .field("graph", &self.graph)
            .field("config", &self.config)
            .finish()
    }
}

/// Restore `prior` and undo the history append
///
/// Returns false, leaving the new record applied, when the history refuses
/// to give the appended entry back.
fn roll_back<E, S, A>(entity: &mut E, accessor: &A, prior: StepRecord<S>) -> bool
where
    S: StepValue,
    A: StepAccessor<E, S> + ?Sized,
{
    if let Some(history) = accessor.history() {
        if history.pop(entity).is_none() {
            error!(
                step = ?prior.value,
                "history refused to remove the appended entry, keeping the transition applied"
            );
            return false;
        }
    }
    accessor.set(entity, prior);
    true
}

fn failed(results: Vec<ValidationResult>) -> Vec<ValidationResult> {
    results.into_iter().filter(|r| !r.success).collect()
}
