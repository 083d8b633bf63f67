//! Tests for configuration validation.
//!
//! These tests verify that invalid configuration values are rejected
//! by the builder methods with appropriate panic messages.

use ipwpath::{Config, PathAnalysis};

fn analysis() -> PathAnalysis {
    PathAnalysis::new("d", ["m1", "m2"], "y")
}

// =============================================================================
// REPLICATIONS VALIDATION
// =============================================================================

#[test]
#[should_panic(expected = "replications must be > 0")]
fn replications_zero_panics() {
    let _ = analysis().bootstrap(0);
}

#[test]
fn replications_one_valid() {
    // Degenerate but accepted: intervals collapse to the single replicate
    let a = analysis().bootstrap(1);
    assert_eq!(a.config().replications, 1);
    assert!(a.config().bootstrap);
}

// =============================================================================
// CONFIDENCE LEVEL VALIDATION
// =============================================================================

#[test]
#[should_panic(expected = "confidence_level must be in (0, 1)")]
fn confidence_level_zero_panics() {
    let _ = analysis().confidence_level(0.0);
}

#[test]
#[should_panic(expected = "confidence_level must be in (0, 1)")]
fn confidence_level_one_panics() {
    let _ = analysis().confidence_level(1.0);
}

#[test]
#[should_panic(expected = "confidence_level must be in (0, 1)")]
fn confidence_level_nan_panics() {
    let _ = analysis().confidence_level(f64::NAN);
}

#[test]
fn confidence_level_common_valid() {
    for level in [0.8, 0.9, 0.95, 0.99] {
        assert_eq!(analysis().confidence_level(level).config().confidence_level, level);
    }
}

// =============================================================================
// CENSORING VALIDATION
// =============================================================================

#[test]
#[should_panic(expected = "censor_low must be in [0, 1]")]
fn censor_low_negative_panics() {
    let _ = analysis().censor(-0.1, 0.9);
}

#[test]
#[should_panic(expected = "censor_high must be in [0, 1]")]
fn censor_high_above_one_panics() {
    let _ = analysis().censor(0.1, 1.5);
}

#[test]
#[should_panic(expected = "censor_low must be < censor_high")]
fn censor_bounds_reversed_panics() {
    let _ = analysis().censor(0.9, 0.1);
}

#[test]
#[should_panic(expected = "censor_low must be < censor_high")]
fn censor_bounds_equal_panics() {
    let _ = analysis().censor(0.5, 0.5);
}

#[test]
fn censor_full_range_valid() {
    let a = analysis().censor(0.0, 1.0);
    assert!(a.config().censor);
    assert_eq!(a.config().censor_low, 0.0);
    assert_eq!(a.config().censor_high, 1.0);
}

#[test]
fn no_censoring_clears_flag() {
    assert!(!analysis().no_censoring().config().censor);
}

// =============================================================================
// PARALLEL VALIDATION
// =============================================================================

#[test]
#[should_panic(expected = "cores must be > 0")]
fn cores_zero_panics() {
    let _ = analysis().parallel(0);
}

#[test]
fn parallel_sets_cores() {
    let a = analysis().parallel(4);
    assert!(a.config().parallel);
    assert_eq!(a.config().cores, 4);
}

// =============================================================================
// ROLES AND DEFAULTS
// =============================================================================

#[test]
fn builder_records_roles() {
    let a = analysis().covariates(["age", "region"]).base_weights("w");
    let roles = a.roles();
    assert_eq!(roles.exposure, "d");
    assert_eq!(roles.mediators, vec!["m1", "m2"]);
    assert_eq!(roles.covariates, vec!["age", "region"]);
    assert_eq!(roles.base_weights.as_deref(), Some("w"));
}

#[test]
fn builder_defaults_match_config_defaults() {
    let a = analysis();
    let defaults = Config::default();
    assert_eq!(a.config().stabilize, defaults.stabilize);
    assert_eq!(a.config().censor_low, defaults.censor_low);
    assert_eq!(a.config().censor_high, defaults.censor_high);
    assert_eq!(a.config().replications, defaults.replications);
    assert!(!a.config().bootstrap);
    assert!(!a.config().parallel);
}
