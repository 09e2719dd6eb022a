//! Validation gates
//!
//! - [`ValidationSet`] - ordered, non-short-circuiting checks over an entity
//! - [`ValidationResult`] - outcome of one check
//! - [`ValidationError`] - the failed checks of a rejected transition

mod error;
mod set;

pub use error::{ValidationError, ValidationPhase};
pub use set::{Predicate, ValidationResult, ValidationSet};
