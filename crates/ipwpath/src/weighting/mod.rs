//! Reference natural-effect estimator based on inverse probability weighting.
//!
//! For one mediator subset M (the first k mediators) and covariates C:
//!
//! 1. Fit P(D = 1 | C) and P(D = 1 | M, C) by weighted logistic regression.
//! 2. Weight unexposed rows by 1 / P(D = 0 | C), exposed rows by
//!    1 / P(D = 1 | C), and, for the cross-world mean, exposed rows by
//!    P(D = 0 | M, C) / (P(D = 1 | M, C) P(D = 0 | C)).
//! 3. Optionally stabilize by the marginal exposure probabilities and
//!    winsorize each weight vector within its exposure group.
//! 4. Take weighted outcome means E[Y(0)], E[Y(1)], E[Y(1, M(0))] and form
//!    ATE = E[Y(1)] - E[Y(0)], NDE = E[Y(1, M(0))] - E[Y(0)],
//!    NIE = E[Y(1)] - E[Y(1, M(0))].
//!
//! Base sampling weights, when given, are rescaled to mean one and multiply
//! both the propensity-model fits and the final weights.

mod design;
mod logistic;
mod weights;

pub use design::{design_matrix, numeric_column};
pub use logistic::{fit_logistic, IrlsSettings, LogisticFit};
pub use weights::{
    normalize_base_weights, weighted_mean, winsorize_group, PathWeights, WeightInputs,
};

use tracing::debug;

use ipwpath_core::{
    Dataset, EstimationError, NaturalEffectEstimator, NaturalEffectRequest, NaturalEffects,
};

/// IPW estimator of natural direct and indirect effects.
///
/// # Example
///
/// ```ignore
/// use ipwpath::{IpwMediation, PathAnalysis};
///
/// let result = PathAnalysis::new("treated", ["m1", "m2"], "income")
///     .run_with(&data, &IpwMediation::new())?;
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IpwMediation {
    settings: IrlsSettings,
}

impl IpwMediation {
    /// Estimator with default IRLS settings (25 iterations, tolerance 1e-8).
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimator with custom IRLS settings.
    pub fn with_settings(settings: IrlsSettings) -> Self {
        Self { settings }
    }

    /// Current IRLS settings.
    pub fn settings(&self) -> IrlsSettings {
        self.settings
    }
}

impl NaturalEffectEstimator for IpwMediation {
    fn estimate(
        &self,
        data: &Dataset,
        request: &NaturalEffectRequest<'_>,
    ) -> Result<NaturalEffects, EstimationError> {
        let exposure = numeric_column(data, request.exposure)?;
        let outcome = numeric_column(data, request.outcome)?;
        let base = match request.base_weights {
            Some(column) => normalize_base_weights(column, &numeric_column(data, column)?)?,
            None => vec![1.0; data.n_rows()],
        };

        let observed = |level: f64| {
            exposure
                .iter()
                .zip(&base)
                .any(|(&d, &w)| d == level && w > 0.0)
        };
        if !(observed(0.0) && observed(1.0)) {
            return Err(EstimationError::DegenerateExposure {
                column: request.exposure.to_string(),
            });
        }

        let (x_baseline, _) = design_matrix(data, &request.baseline.predictors)?;
        let (x_augmented, _) = design_matrix(data, &request.augmented.predictors)?;
        let baseline = fit_logistic(
            &x_baseline,
            &exposure,
            &base,
            &request.baseline.to_string(),
            self.settings,
        )?;
        let augmented = fit_logistic(
            &x_augmented,
            &exposure,
            &base,
            &request.augmented.to_string(),
            self.settings,
        )?;

        let marginal = weighted_mean(&exposure, &base).ok_or_else(|| {
            EstimationError::InvalidWeights {
                column: request.base_weights.unwrap_or("<none>").to_string(),
                reason: "weights sum to zero".to_string(),
            }
        })?;

        let mut weights = PathWeights::build(
            &WeightInputs {
                exposure: &exposure,
                baseline: &baseline.fitted,
                augmented: &augmented.fitted,
                base: &base,
                marginal,
            },
            request.weights.stabilize,
        );
        if request.weights.censor {
            weights.censor(
                &exposure,
                request.weights.censor_low,
                request.weights.censor_high,
            );
        }

        let y0 = weighted_mean(&outcome, &weights.control)
            .ok_or(EstimationError::EmptyGroup { level: 0 })?;
        let y1 = weighted_mean(&outcome, &weights.treated)
            .ok_or(EstimationError::EmptyGroup { level: 1 })?;
        let y10 = weighted_mean(&outcome, &weights.cross_world)
            .ok_or(EstimationError::EmptyGroup { level: 1 })?;

        debug!(
            mediators = request.mediators.len(),
            y0, y1, y10, "weighted potential-outcome means"
        );

        Ok(NaturalEffects {
            ate: y1 - y0,
            nde: y10 - y0,
            nie: y1 - y10,
        })
    }
}
