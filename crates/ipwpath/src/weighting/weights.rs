//! Inverse-probability weights: construction, censoring and weighted means.

use ipwpath_core::statistics::compute_quantile;
use ipwpath_core::EstimationError;

/// Rescale base weights to mean one.
///
/// # Errors
///
/// `InvalidWeights` if any weight is negative or non-finite, or if they sum
/// to zero.
pub fn normalize_base_weights(column: &str, weights: &[f64]) -> Result<Vec<f64>, EstimationError> {
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(EstimationError::InvalidWeights {
            column: column.to_string(),
            reason: format!("weights must be finite and non-negative, found {}", bad),
        });
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(EstimationError::InvalidWeights {
            column: column.to_string(),
            reason: "weights sum to zero".to_string(),
        });
    }
    let scale = weights.len() as f64 / total;
    Ok(weights.iter().map(|w| w * scale).collect())
}

/// Weighted mean of `values`, or `None` if the weights sum to zero.
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> Option<f64> {
    let (num, den) = values
        .iter()
        .zip(weights)
        .fold((0.0, 0.0), |(num, den), (&v, &w)| (num + v * w, den + w));
    (den > 0.0).then(|| num / den)
}

/// Clamp the entries of `weights` selected by `group` to the `low` and
/// `high` quantiles of that selection.
///
/// Entries outside the group are left untouched. An empty group is a no-op.
pub fn winsorize_group(weights: &mut [f64], group: &[bool], low: f64, high: f64) {
    let mut selected: Vec<f64> = weights
        .iter()
        .zip(group)
        .filter_map(|(&w, &g)| g.then_some(w))
        .collect();
    if selected.is_empty() {
        return;
    }
    let lo = compute_quantile(&mut selected, low);
    let hi = compute_quantile(&mut selected, high);
    for (w, &g) in weights.iter_mut().zip(group) {
        if g {
            *w = w.max(lo).min(hi);
        }
    }
}

/// Per-row ingredients for the three weight vectors.
pub struct WeightInputs<'a> {
    /// Exposure indicator (0/1).
    pub exposure: &'a [f64],
    /// P(D = 1 | C) from the baseline model.
    pub baseline: &'a [f64],
    /// P(D = 1 | M, C) from the augmented model.
    pub augmented: &'a [f64],
    /// Base weights, already rescaled to mean one.
    pub base: &'a [f64],
    /// Marginal P(D = 1), used for stabilization.
    pub marginal: f64,
}

/// The three weight vectors. Rows outside a vector's exposure group carry
/// weight zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PathWeights {
    /// Unexposed rows standing in for E[Y(0)].
    pub control: Vec<f64>,
    /// Exposed rows standing in for E[Y(1)].
    pub treated: Vec<f64>,
    /// Exposed rows reweighted to the unexposed mediator law, for E[Y(1, M(0))].
    pub cross_world: Vec<f64>,
}

impl PathWeights {
    /// Build the weights, stabilizing by the marginal exposure probability
    /// when `stabilize` is set.
    pub fn build(inputs: &WeightInputs<'_>, stabilize: bool) -> Self {
        let n = inputs.exposure.len();
        let (s1, s0) = if stabilize {
            (inputs.marginal, 1.0 - inputs.marginal)
        } else {
            (1.0, 1.0)
        };

        let mut control = vec![0.0; n];
        let mut treated = vec![0.0; n];
        let mut cross_world = vec![0.0; n];

        for i in 0..n {
            let base = inputs.base[i];
            let p_c = inputs.baseline[i];
            let p_mc = inputs.augmented[i];
            if inputs.exposure[i] == 1.0 {
                treated[i] = base * s1 / p_c;
                cross_world[i] = base * s1 * (1.0 - p_mc) / (p_mc * (1.0 - p_c));
            } else {
                control[i] = base * s0 / (1.0 - p_c);
            }
        }

        Self {
            control,
            treated,
            cross_world,
        }
    }

    /// Winsorize each vector within its exposure group.
    pub fn censor(&mut self, exposure: &[f64], low: f64, high: f64) {
        let exposed: Vec<bool> = exposure.iter().map(|&d| d == 1.0).collect();
        let unexposed: Vec<bool> = exposed.iter().map(|&e| !e).collect();
        winsorize_group(&mut self.control, &unexposed, low, high);
        winsorize_group(&mut self.treated, &exposed, low, high);
        winsorize_group(&mut self.cross_world, &exposed, low, high);
    }
}
