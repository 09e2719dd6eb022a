//! Lifecycle hooks and event templates

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Point in the transition protocol at which a hook fires
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HookPoint {
    /// Declared on the target step, fired before the step changes
    BeforeEntering,

    /// Declared on the source step, fired before the step changes
    BeforeLeaving,

    /// Declared on the target step, fired after the step changed
    AfterEntering,

    /// Declared on the source step, fired after the step changed
    AfterLeaving,
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BeforeEntering => write!(f, "before_entering"),
            Self::BeforeLeaving => write!(f, "before_leaving"),
            Self::AfterEntering => write!(f, "after_entering"),
            Self::AfterLeaving => write!(f, "after_leaving"),
        }
    }
}

/// Template for an event, bound to the entity when the hook fires
///
/// Templates are declared when the graph is built and bound at transition
/// time, so the event sees the entity as it is at that point in the protocol.
/// Any `Fn(&E) -> V` closure is a template.
///
/// ```
/// use stepgraph::EventTemplate;
///
/// struct Order { id: u32 }
///
/// let shipped = |o: &Order| format!("order {} shipped", o.id);
/// assert_eq!(shipped.bind(&Order { id: 7 }), "order 7 shipped");
/// ```
pub trait EventTemplate<E, V>: Send + Sync {
    /// Produce the event for this entity
    fn bind(&self, entity: &E) -> V;
}

impl<E, V, F> EventTemplate<E, V> for F
where
    F: Fn(&E) -> V + Send + Sync,
{
    fn bind(&self, entity: &E) -> V {
        self(entity)
    }
}

/// Shared, type-erased event template as stored in a step definition
pub type EventSpec<E, V> = Arc<dyn EventTemplate<E, V>>;
