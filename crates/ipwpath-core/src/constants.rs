//! Constants used throughout the crate.

/// Default deterministic seed for RNG operations.
///
/// The value `0x69707770617468` is "ipwpath" encoded in ASCII.
pub const DEFAULT_SEED: u64 = 0x69707770617468;

// =============================================================================
// Default configuration constants
// =============================================================================

/// Default number of bootstrap replications.
pub const DEFAULT_REPLICATIONS: usize = 200;

/// Default confidence level for percentile intervals.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Default lower quantile at which weights are censored.
pub const DEFAULT_CENSOR_LOW: f64 = 0.01;

/// Default upper quantile at which weights are censored.
pub const DEFAULT_CENSOR_HIGH: f64 = 0.99;

/// Minimum number of workers for which a parallel bootstrap is attempted.
pub const MIN_PARALLEL_WORKERS: usize = 2;

// =============================================================================
// Path labels
// =============================================================================

/// Label of the direct effect when a single mediator is analysed.
pub const LABEL_NDE: &str = "NDE";

/// Label of the indirect effect when a single mediator is analysed.
pub const LABEL_NIE: &str = "NIE";

/// Label of the effect bypassing every mediator.
pub const LABEL_DIRECT: &str = "D->Y";

/// Label of the total effect in replicate tables.
pub const LABEL_ATE: &str = "ATE";
