//! Step values and step records

use std::fmt::Debug;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A value identifying which step an entity is in
///
/// In practice this is a fieldless enum. Anything with equality, hashing and a
/// `Debug` label qualifies; the label is what appears in errors and logs.
pub trait StepValue: Debug + Clone + Eq + Hash + Send + Sync + 'static {}

impl<T> StepValue for T where T: Debug + Clone + Eq + Hash + Send + Sync + 'static {}

/// Snapshot of "the entity is currently in step X"
///
/// Records are never edited in place. Every transition writes a fresh record,
/// and the previous one is either dropped or pushed onto the entity's history.
///
/// `id` and `created_at` belong to the caller's storage layer. The engine never
/// reads them and always leaves them unset on the records it creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord<S> {
    /// The step value
    pub value: S,

    /// Why the entity moved into this step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Storage identity assigned by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// Storage creation time assigned by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl<S> StepRecord<S> {
    /// Create a record with no reason and no storage metadata
    pub fn new(value: S) -> Self {
        Self {
            value,
            reason: None,
            id: None,
            created_at: None,
        }
    }

    /// Set the reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Set the storage identity
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the storage creation time
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// The reason, or `""` when none was given
    pub fn reason(&self) -> &str {
        self.reason.as_deref().unwrap_or("")
    }

    /// Whether a non-empty reason is present
    pub fn has_reason(&self) -> bool {
        !self.reason().is_empty()
    }

    /// Build the record written by a transition.
    ///
    /// Constructed from scratch: nothing carries over from the prior record.
    pub(crate) fn successor(value: S, reason: Option<&str>) -> Self {
        Self {
            value,
            reason: reason.map(str::to_owned),
            id: None,
            created_at: None,
        }
    }
}
