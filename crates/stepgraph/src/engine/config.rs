//! Engine configuration

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// What happens when post-phase validation fails
///
/// Post checks run after the new step record was written. The two policies
/// differ only in whether that write survives the failure.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PostValidationPolicy {
    /// Keep the new record and the history entry; the error reports
    /// `committed = true`. Post checks audit a transition, they do not guard it.
    #[default]
    Advisory,

    /// Restore the prior record and drop the history entry this transition
    /// appended; the error reports `committed = false`. Events already
    /// published by before-hooks are not retracted.
    Rollback,
}

impl fmt::Display for PostValidationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Advisory => write!(f, "advisory"),
            Self::Rollback => write!(f, "rollback"),
        }
    }
}

impl FromStr for PostValidationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "advisory" => Ok(Self::Advisory),
            "rollback" => Ok(Self::Rollback),
            other => Err(format!("unknown post-validation policy: {other}")),
        }
    }
}

/// Configuration for the step engine
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Handling of post-phase validation failures
    #[serde(default)]
    pub post_validation: PostValidationPolicy,
}

impl EngineConfig {
    /// Create configuration from environment variables
    ///
    /// Environment variables:
    /// - `STEPGRAPH_POST_VALIDATION`: `advisory` (default) or `rollback`
    pub fn from_env() -> Self {
        let post_validation = match env::var("STEPGRAPH_POST_VALIDATION") {
            Ok(value) => value.parse().unwrap_or_else(|e: String| {
                warn!(error = %e, "falling back to default post-validation policy");
                PostValidationPolicy::default()
            }),
            Err(_) => PostValidationPolicy::default(),
        };

        Self { post_validation }
    }

    /// Set the post-validation policy
    pub fn with_post_validation(mut self, policy: PostValidationPolicy) -> Self {
        self.post_validation = policy;
        self
    }
}
