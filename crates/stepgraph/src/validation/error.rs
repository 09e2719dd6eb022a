//! Validation failure reporting

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationResult;

/// Which validation phase rejected a transition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPhase {
    /// Exit checks of the source step and entry checks of the target step,
    /// run before anything is mutated
    Pre,

    /// Post-exit checks of the source step and post-entry checks of the
    /// target step, run after the new record was written
    Post,
}

impl fmt::Display for ValidationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pre => write!(f, "pre"),
            Self::Post => write!(f, "post"),
        }
    }
}

/// One or more validation checks failed
///
/// `failures` holds only the failed results, in evaluation order. Passing
/// checks were still evaluated but are not part of the payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "{phase}-validation rejected {from} -> {to}: {}",
    join_messages(.failures)
)]
pub struct ValidationError {
    /// Phase that failed
    pub phase: ValidationPhase,

    /// Label of the source step
    pub from: String,

    /// Label of the requested step
    pub to: String,

    /// Failed checks in evaluation order
    pub failures: Vec<ValidationResult>,

    /// Whether the new step record is still applied to the entity
    ///
    /// Always false for the pre phase. For the post phase it depends on the
    /// engine's post-validation policy.
    pub committed: bool,
}

impl ValidationError {
    /// Failure messages in evaluation order
    pub fn messages(&self) -> Vec<&str> {
        self.failures.iter().map(ValidationResult::message).collect()
    }

    /// Whether any failure carries exactly this message
    pub fn has_message(&self, message: &str) -> bool {
        self.failures.iter().any(|f| f.message() == message)
    }
}

fn join_messages(failures: &[ValidationResult]) -> String {
    failures
        .iter()
        .map(ValidationResult::message)
        .collect::<Vec<_>>()
        .join("; ")
}
