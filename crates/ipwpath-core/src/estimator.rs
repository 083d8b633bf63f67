//! The natural-effect estimator contract.
//!
//! The path decomposition never fits models itself. For each mediator subset
//! it hands a [`NaturalEffectRequest`] to an implementation of
//! [`NaturalEffectEstimator`], which fits the two propensity models, builds
//! the inverse-probability weights and returns ATE / NDE / NIE.

use crate::error::EstimationError;
use crate::types::{Dataset, NaturalEffects, PropensitySpec, WeightOptions};

/// Everything an estimator needs for one mediator subset.
#[derive(Debug, Clone, Copy)]
pub struct NaturalEffectRequest<'a> {
    /// Binary exposure column.
    pub exposure: &'a str,
    /// The first k mediators, in causal order.
    pub mediators: &'a [String],
    /// Outcome column.
    pub outcome: &'a str,
    /// Exposure model excluding the mediators.
    pub baseline: &'a PropensitySpec,
    /// Exposure model including the mediators.
    pub augmented: &'a PropensitySpec,
    /// Optional base sampling weights column.
    pub base_weights: Option<&'a str>,
    /// Stabilization and censoring settings.
    pub weights: WeightOptions,
}

/// Estimates natural direct and indirect effects for a mediator subset.
///
/// Implementations must be pure functions of their inputs: the bootstrap
/// calls them concurrently from several workers on different resamples.
pub trait NaturalEffectEstimator: Sync {
    /// Estimate (ATE, NDE, NIE) on `data`.
    fn estimate(
        &self,
        data: &Dataset,
        request: &NaturalEffectRequest<'_>,
    ) -> Result<NaturalEffects, EstimationError>;
}

impl<F> NaturalEffectEstimator for F
where
    F: Fn(&Dataset, &NaturalEffectRequest<'_>) -> Result<NaturalEffects, EstimationError> + Sync,
{
    fn estimate(
        &self,
        data: &Dataset,
        request: &NaturalEffectRequest<'_>,
    ) -> Result<NaturalEffects, EstimationError> {
        self(data, request)
    }
}
