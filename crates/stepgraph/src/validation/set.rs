//! Ordered validation sets

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a single validation check
///
/// `message` is only present on failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the predicate held
    pub success: bool,

    /// Failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationResult {
    /// A passing result
    pub fn passed() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// A failing result with its message
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    /// Build a result from a predicate outcome, dropping the message on success
    pub fn check(success: bool, message: &str) -> Self {
        if success {
            Self::passed()
        } else {
            Self::failed(message)
        }
    }

    /// The failure message, or `""` for a passing result
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

/// Predicate over an entity
pub type Predicate<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;

struct ValidationCase<E> {
    predicate: Predicate<E>,
    message: String,
}

/// Ordered list of (predicate, failure message) pairs
///
/// Evaluation runs every predicate in insertion order and never stops early:
/// the full result list is what callers use for diagnostics.
pub struct ValidationSet<E> {
    cases: Vec<ValidationCase<E>>,
}

impl<E> Default for ValidationSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ValidationSet<E> {
    /// Create an empty set
    pub fn new() -> Self {
        Self { cases: Vec::new() }
    }

    /// Append a check
    pub fn add<F>(&mut self, predicate: F, message: impl Into<String>)
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.cases.push(ValidationCase {
            predicate: Box::new(predicate),
            message: message.into(),
        });
    }

    /// Number of checks
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether the set has no checks
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Failure messages in evaluation order
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(|c| c.message.as_str())
    }

    /// Evaluate every check against the entity
    pub fn evaluate(&self, entity: &E) -> Vec<ValidationResult> {
        let mut results = Vec::with_capacity(self.cases.len());
        self.evaluate_into(entity, &mut results);
        results
    }

    /// Evaluate every check, appending results to `out`
    pub(crate) fn evaluate_into(&self, entity: &E, out: &mut Vec<ValidationResult>) {
        out.extend(
            self.cases
                .iter()
                .map(|case| ValidationResult::check((case.predicate)(entity), &case.message)),
        );
    }
}

impl<E> fmt::Debug for ValidationSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationSet")
            .field("checks", &self.messages().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_evaluate_preserves_order() {
        let mut set = ValidationSet::<i32>::new();
        set.add(|n| *n > 0, "must be positive");
        set.add(|n| *n % 2 == 0, "must be even");
        set.add(|n| *n < 100, "must be below 100");

        let results = set.evaluate(&3);
        assert_eq!(
            results,
            vec![
                ValidationResult::passed(),
                ValidationResult::failed("must be even"),
                ValidationResult::passed(),
            ]
        );
    }

    #[test]
    fn test_evaluate_does_not_short_circuit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut set = ValidationSet::<()>::new();
        for i in 0..3 {
            let calls = calls.clone();
            set.add(
                move |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    false
                },
                format!("check {i}"),
            );
        }

        let results = set.evaluate(&());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(results.iter().all(|r| !r.success));
        assert_eq!(results[2].message(), "check 2");
    }

    #[test]
    fn test_empty_set() {
        let set = ValidationSet::<i32>::default();
        assert!(set.is_empty());
        assert!(set.evaluate(&1).is_empty());
    }

    #[test]
    fn test_passed_result_has_no_message() {
        let result = ValidationResult::check(true, "ignored");
        assert_eq!(result.message, None);

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"success":true}"#);
    }

    #[test]
    fn test_debug_lists_messages() {
        let mut set = ValidationSet::<i32>::new();
        set.add(|_| true, "always");
        assert!(format!("{:?}", set).contains("always"));
    }
}
