//! Environment-driven engine configuration
//!
//! Kept in its own test binary: it mutates process environment variables.

use stepgraph::{EngineConfig, PostValidationPolicy};

const VAR: &str = "STEPGRAPH_POST_VALIDATION";

#[test_log::test]
fn test_engine_config_from_env() {
    std::env::remove_var(VAR);
    assert_eq!(
        EngineConfig::from_env().post_validation,
        PostValidationPolicy::Advisory
    );

    std::env::set_var(VAR, "rollback");
    assert_eq!(
        EngineConfig::from_env().post_validation,
        PostValidationPolicy::Rollback
    );

    std::env::set_var(VAR, "ROLLBACK ");
    assert_eq!(
        EngineConfig::from_env().post_validation,
        PostValidationPolicy::Rollback
    );

    // Unknown values fall back to the default
    std::env::set_var(VAR, "undo");
    assert_eq!(
        EngineConfig::from_env().post_validation,
        PostValidationPolicy::Advisory
    );

    std::env::remove_var(VAR);
}
