//! Configuration for path-specific effect estimation.

use serde::{Deserialize, Serialize};

use ipwpath_core::constants::{
    DEFAULT_CENSOR_HIGH, DEFAULT_CENSOR_LOW, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_REPLICATIONS,
};
use ipwpath_core::{BootstrapOptions, EstimateOptions, WeightOptions};

/// Configuration options for `PathAnalysis`.
///
/// Covers weight handling and bootstrap inference. Variable roles (exposure,
/// mediators, outcome, covariates, base weights) are given separately as a
/// [`VariableRoles`](ipwpath_core::VariableRoles).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // =========================================================================
    // Weights
    // =========================================================================
    /// Multiply inverse-probability weights by the marginal exposure
    /// probability. Default: true.
    pub stabilize: bool,

    /// Winsorize weights at `censor_low` / `censor_high` quantiles within each
    /// exposure group. Default: true.
    pub censor: bool,

    /// Lower censoring quantile. Default: 0.01.
    pub censor_low: f64,

    /// Upper censoring quantile. Default: 0.99.
    pub censor_high: f64,

    // =========================================================================
    // Inference
    // =========================================================================
    /// Run the nonparametric bootstrap. Default: false.
    pub bootstrap: bool,

    /// Number of bootstrap replications. Default: 200.
    pub replications: usize,

    /// Confidence level of the percentile intervals. Default: 0.95.
    pub confidence_level: f64,

    /// Seed for the bootstrap random streams.
    ///
    /// `Some(seed)` makes replicates reproducible within an execution mode.
    /// `None` draws a fresh seed per call; the seed used is reported in the
    /// bootstrap summary. Default: None.
    pub seed: Option<u64>,

    /// Run replications on a worker pool. Default: false.
    pub parallel: bool,

    /// Worker count for parallel replications. Fewer than two degrades to
    /// serial execution. Default: available parallelism.
    pub cores: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stabilize: true,
            censor: true,
            censor_low: DEFAULT_CENSOR_LOW,
            censor_high: DEFAULT_CENSOR_HIGH,
            bootstrap: false,
            replications: DEFAULT_REPLICATIONS,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            seed: None,
            parallel: false,
            cores: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

impl Config {
    /// Create a new Config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight handling passed to the natural-effect estimator.
    pub fn weight_options(&self) -> WeightOptions {
        WeightOptions {
            stabilize: self.stabilize,
            censor: self.censor,
            censor_low: self.censor_low,
            censor_high: self.censor_high,
        }
    }

    /// Options for one estimation call.
    ///
    /// When bootstrapping without a fixed seed, a fresh one is drawn here.
    pub fn estimate_options(&self) -> EstimateOptions {
        EstimateOptions {
            weights: self.weight_options(),
            bootstrap: self.bootstrap.then(|| BootstrapOptions {
                replications: self.replications,
                confidence_level: self.confidence_level,
                seed: self.seed.unwrap_or_else(rand::random),
                parallel: self.parallel,
                workers: self.cores,
            }),
        }
    }
}
