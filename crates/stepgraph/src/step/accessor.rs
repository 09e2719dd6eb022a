//! Entity accessors
//!
//! The engine never looks inside an entity. It reads and writes the current
//! step record through a [`StepAccessor`], and the history, when there is
//! one, through the [`StepHistory`] that accessor exposes.

use super::StepRecord;

/// Capability to read and write an entity's step field
///
/// `set` followed by `get` must return exactly the record that was set.
///
/// History is a separate capability. Accessors that keep no history leave
/// [`history`](Self::history) at its default and the engine skips the
/// history append.
pub trait StepAccessor<E, S>: Send + Sync {
    /// Read the current step record
    fn get(&self, entity: &E) -> StepRecord<S>;

    /// Replace the current step record
    fn set(&self, entity: &mut E, record: StepRecord<S>);

    /// The entity's history sequence, if this accessor maintains one
    fn history(&self) -> Option<&dyn StepHistory<E, S>> {
        None
    }
}

/// Append-only history of prior step records
///
/// `pop` exists only to undo the append of a transition that is rolled back.
/// A history that cannot remove entries returns `None`; the engine then keeps
/// the transition applied instead of half-reverting it.
pub trait StepHistory<E, S>: Send + Sync {
    /// Append a record to the end of the history
    fn append(&self, entity: &mut E, record: StepRecord<S>);

    /// Remove and return the most recent entry
    fn pop(&self, entity: &mut E) -> Option<StepRecord<S>>;
}

/// History backed by a `Vec` field on the entity
pub struct FieldHistory<E, S> {
    field: fn(&mut E) -> &mut Vec<StepRecord<S>>,
}

impl<E, S> FieldHistory<E, S> {
    /// Create a history over the given field projection
    pub fn new(field: fn(&mut E) -> &mut Vec<StepRecord<S>>) -> Self {
        Self { field }
    }
}

impl<E, S> Clone for FieldHistory<E, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, S> Copy for FieldHistory<E, S> {}

impl<E, S> StepHistory<E, S> for FieldHistory<E, S> {
    fn append(&self, entity: &mut E, record: StepRecord<S>) {
        (self.field)(entity).push(record);
    }

    fn pop(&self, entity: &mut E) -> Option<StepRecord<S>> {
        (self.field)(entity).pop()
    }
}

/// Accessor built from plain field projections
///
/// # Example
///
/// ```
/// use stepgraph::{FieldAccessor, StepAccessor, StepRecord};
///
/// struct Ticket {
///     status: StepRecord<u8>,
///     history: Vec<StepRecord<u8>>,
/// }
///
/// fn status(t: &Ticket) -> &StepRecord<u8> { &t.status }
/// fn status_mut(t: &mut Ticket) -> &mut StepRecord<u8> { &mut t.status }
/// fn history(t: &mut Ticket) -> &mut Vec<StepRecord<u8>> { &mut t.history }
///
/// let accessor = FieldAccessor::new(status, status_mut).with_history(history);
/// assert!(accessor.history().is_some());
/// ```
pub struct FieldAccessor<E, S> {
    current: fn(&E) -> &StepRecord<S>,
    current_mut: fn(&mut E) -> &mut StepRecord<S>,
    history: Option<FieldHistory<E, S>>,
}

impl<E, S> FieldAccessor<E, S> {
    /// Create an accessor for the current step field, without history
    pub fn new(
        current: fn(&E) -> &StepRecord<S>,
        current_mut: fn(&mut E) -> &mut StepRecord<S>,
    ) -> Self {
        Self {
            current,
            current_mut,
            history: None,
        }
    }

    /// Also maintain a history vector
    pub fn with_history(mut self, history: fn(&mut E) -> &mut Vec<StepRecord<S>>) -> Self {
        self.history = Some(FieldHistory::new(history));
        self
    }
}

impl<E, S> Clone for FieldAccessor<E, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, S> Copy for FieldAccessor<E, S> {}

impl<E, S> std::fmt::Debug for FieldAccessor<E, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("history", &self.history.is_some())
            .finish()
    }
}

impl<E, S> StepAccessor<E, S> for FieldAccessor<E, S>
where
    S: Clone,
{
    fn get(&self, entity: &E) -> StepRecord<S> {
        (self.current)(entity).clone()
    }

    fn set(&self, entity: &mut E, record: StepRecord<S>) {
        *(self.current_mut)(entity) = record;
    }

    fn history(&self) -> Option<&dyn StepHistory<E, S>> {
        self.history
            .as_ref()
            .map(|history| history as &dyn StepHistory<E, S>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Door {
        state: StepRecord<&'static str>,
        log: Vec<StepRecord<&'static str>>,
    }

    fn state(d: &Door) -> &StepRecord<&'static str> {
        &d.state
    }

    fn state_mut(d: &mut Door) -> &mut StepRecord<&'static str> {
        &mut d.state
    }

    fn log(d: &mut Door) -> &mut Vec<StepRecord<&'static str>> {
        &mut d.log
    }

    fn door() -> Door {
        Door {
            state: StepRecord::new("closed"),
            log: vec![],
        }
    }

    #[test]
    fn test_get_set_round_trip() {
        let accessor = FieldAccessor::new(state, state_mut);
        let mut door = door();

        let record = StepRecord::new("open").with_reason("knock");
        accessor.set(&mut door, record.clone());
        assert_eq!(accessor.get(&door), record);
    }

    #[test]
    fn test_without_history() {
        let accessor = FieldAccessor::new(state, state_mut);
        assert!(accessor.history().is_none());
    }

    #[test]
    fn test_history_append_and_pop() {
        let accessor = FieldAccessor::new(state, state_mut).with_history(log);
        let history = accessor.history().expect("history should be configured");
        let mut door = door();

        history.append(&mut door, StepRecord::new("closed"));
        history.append(&mut door, StepRecord::new("open"));
        assert_eq!(door.log.len(), 2);

        let popped = history.pop(&mut door).expect("should pop last entry");
        assert_eq!(popped.value, "open");
        assert_eq!(door.log.len(), 1);
    }
}
