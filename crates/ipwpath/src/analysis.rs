//! Main `PathAnalysis` entry point and builder.

use ipwpath_core::{Dataset, NaturalEffectEstimator, PathEstimate, Result, VariableRoles};

use crate::config::Config;
use crate::weighting::IpwMediation;

/// Main entry point for path-specific effect analysis.
///
/// Use the builder pattern to name the variables, configure weighting and
/// inference, then run on a dataset.
///
/// # Example
///
/// ```ignore
/// use ipwpath::PathAnalysis;
///
/// let result = PathAnalysis::new("treated", ["m1", "m2"], "income")
///     .covariates(["age", "region"])
///     .bootstrap(500)
///     .seed(42)
///     .run(&data)?;
///
/// for effect in &result.effects {
///     println!("{}: {:.3}", effect.name, effect.value);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PathAnalysis {
    roles: VariableRoles,
    config: Config,
}

impl PathAnalysis {
    /// Start an analysis of `exposure` on `outcome` through `mediators`,
    /// given in causal order (earliest first).
    pub fn new(
        exposure: impl Into<String>,
        mediators: impl IntoIterator<Item = impl Into<String>>,
        outcome: impl Into<String>,
    ) -> Self {
        Self::from_parts(VariableRoles::new(exposure, mediators, outcome), Config::default())
    }

    /// Build from existing roles and configuration.
    pub fn from_parts(roles: VariableRoles, config: Config) -> Self {
        Self { roles, config }
    }

    /// Set baseline covariates.
    pub fn covariates(mut self, covariates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.roles = self.roles.with_covariates(covariates);
        self
    }

    /// Set the base sampling-weights column.
    pub fn base_weights(mut self, column: impl Into<String>) -> Self {
        self.roles = self.roles.with_base_weights(column);
        self
    }

    /// Enable or disable weight stabilization.
    pub fn stabilize(mut self, stabilize: bool) -> Self {
        self.config.stabilize = stabilize;
        self
    }

    /// Censor weights at the `low` and `high` quantiles.
    ///
    /// # Panics
    ///
    /// Panics if either bound is outside [0, 1] or `low >= high`.
    pub fn censor(mut self, low: f64, high: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&low),
            "censor_low must be in [0, 1], got {}",
            low
        );
        assert!(
            (0.0..=1.0).contains(&high),
            "censor_high must be in [0, 1], got {}",
            high
        );
        assert!(
            low < high,
            "censor_low must be < censor_high (got {} >= {})",
            low,
            high
        );
        self.config.censor = true;
        self.config.censor_low = low;
        self.config.censor_high = high;
        self
    }

    /// Use raw, uncensored weights.
    pub fn no_censoring(mut self) -> Self {
        self.config.censor = false;
        self
    }

    /// Run a bootstrap with `replications` replicates.
    ///
    /// # Panics
    ///
    /// Panics if `replications` is 0.
    pub fn bootstrap(mut self, replications: usize) -> Self {
        assert!(replications > 0, "replications must be > 0");
        self.config.bootstrap = true;
        self.config.replications = replications;
        self
    }

    /// Set the confidence level of bootstrap intervals.
    ///
    /// # Panics
    ///
    /// Panics if `level` is not in (0, 1).
    pub fn confidence_level(mut self, level: f64) -> Self {
        assert!(
            level > 0.0 && level < 1.0,
            "confidence_level must be in (0, 1), got {}",
            level
        );
        self.config.confidence_level = level;
        self
    }

    /// Fix the bootstrap seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Run bootstrap replications on `cores` workers.
    ///
    /// Fewer than two workers falls back to serial execution with an advisory.
    ///
    /// # Panics
    ///
    /// Panics if `cores` is 0.
    pub fn parallel(mut self, cores: usize) -> Self {
        assert!(cores > 0, "cores must be > 0");
        self.config.parallel = true;
        self.config.cores = cores;
        self
    }

    /// The variable roles.
    pub fn roles(&self) -> &VariableRoles {
        &self.roles
    }

    /// The configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run with the reference IPW estimator.
    pub fn run(&self, data: &Dataset) -> Result<PathEstimate> {
        self.run_with(data, &IpwMediation::new())
    }

    /// Run with a custom natural-effect estimator.
    pub fn run_with<E>(&self, data: &Dataset, estimator: &E) -> Result<PathEstimate>
    where
        E: NaturalEffectEstimator + ?Sized,
    {
        ipwpath_core::estimate(data, &self.roles, &self.config.estimate_options(), estimator)
    }
}

/// Estimate the ATE and path-specific effects with the reference IPW estimator.
///
/// Equivalent to `PathAnalysis::from_parts(roles.clone(), config.clone()).run(data)`.
///
/// # Arguments
///
/// * `data` - The dataset
/// * `roles` - Exposure, ordered mediators, outcome, covariates, base weights
/// * `config` - Weighting and bootstrap settings
pub fn estimate(data: &Dataset, roles: &VariableRoles, config: &Config) -> Result<PathEstimate> {
    ipwpath_core::estimate(data, roles, &config.estimate_options(), &IpwMediation::new())
}
