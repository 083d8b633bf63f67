//! Logistic regression by iteratively reweighted least squares.
//!
//! Fits `logit P(y = 1 | x) = x'beta` with prior (sampling) weights, the
//! quasi-binomial way: weights scale each observation's contribution to the
//! score but do not need to be integer counts.
//!
//! Each iteration solves the weighted normal equations
//! ```text
//! (X' W X) beta = X' W z,    W = w * mu (1 - mu),    z = eta + (y - mu) / (mu (1 - mu))
//! ```
//! by Cholesky decomposition and stops when the relative change in deviance
//! falls below the tolerance.

use nalgebra::{Cholesky, DMatrix, DVector};
use tracing::debug;

use ipwpath_core::EstimationError;

/// Fitted probabilities closer than this to 0 or 1 signal separation.
const PROBABILITY_EPS: f64 = 10.0 * f64::EPSILON;

/// A column whose share of X'WX not explained by earlier columns falls
/// below this is treated as collinear.
const RANK_TOLERANCE: f64 = 1e-10;

/// Convergence controls for IRLS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrlsSettings {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Relative deviance tolerance.
    pub tolerance: f64,
}

impl Default for IrlsSettings {
    fn default() -> Self {
        Self {
            max_iterations: 25,
            tolerance: 1e-8,
        }
    }
}

/// A converged logistic fit.
#[derive(Debug, Clone)]
pub struct LogisticFit {
    /// Coefficients, in design-matrix column order.
    pub coefficients: DVector<f64>,
    /// Fitted probabilities P(y = 1 | x).
    pub fitted: Vec<f64>,
    /// Iterations used.
    pub iterations: usize,
    /// Residual deviance.
    pub deviance: f64,
}

#[inline]
fn sigmoid(eta: f64) -> f64 {
    1.0 / (1.0 + (-eta).exp())
}

fn deviance(y: &[f64], mu: &[f64], w: &[f64]) -> f64 {
    let ylogy = |a: f64, b: f64| if a > 0.0 { a * (a / b).ln() } else { 0.0 };
    2.0 * y
        .iter()
        .zip(mu)
        .zip(w)
        .map(|((&yi, &mi), &wi)| wi * (ylogy(yi, mi) + ylogy(1.0 - yi, 1.0 - mi)))
        .sum::<f64>()
}

/// Cholesky pivots against the diagonal of the decomposed matrix.
///
/// `l[j][j]^2 / a[j][j]` is one minus the weighted R^2 of column j on the
/// columns before it.
fn full_rank(l: &DMatrix<f64>, a: &DMatrix<f64>) -> bool {
    (0..a.nrows()).all(|j| l[(j, j)] * l[(j, j)] > RANK_TOLERANCE * a[(j, j)])
}

/// Fit a weighted logistic regression.
///
/// # Arguments
///
/// * `x` - n x p design matrix (intercept included by the caller)
/// * `y` - Binary response coded 0/1
/// * `prior_weights` - Non-negative observation weights
/// * `model` - Model description used in errors and logs
/// * `settings` - Convergence controls
///
/// # Errors
///
/// `SingularDesign` if X'WX is not positive definite, `NonConvergence` if the
/// deviance has not settled after `max_iterations`, `Separation` if any
/// fitted probability is numerically 0 or 1.
pub fn fit_logistic(
    x: &DMatrix<f64>,
    y: &[f64],
    prior_weights: &[f64],
    model: &str,
    settings: IrlsSettings,
) -> Result<LogisticFit, EstimationError> {
    let n = x.nrows();
    debug_assert_eq!(y.len(), n);
    debug_assert_eq!(prior_weights.len(), n);

    // Same starting values as a binomial GLM
    let mut mu: Vec<f64> = y
        .iter()
        .zip(prior_weights)
        .map(|(&yi, &wi)| (wi * yi + 0.5) / (wi + 1.0))
        .collect();
    let mut eta: Vec<f64> = mu.iter().map(|&m| (m / (1.0 - m)).ln()).collect();
    let mut dev_old = deviance(y, &mu, prior_weights);

    for iteration in 1..=settings.max_iterations {
        let mut working = DVector::zeros(n);
        let mut xw = x.clone();
        for i in 0..n {
            let var = (mu[i] * (1.0 - mu[i])).max(f64::MIN_POSITIVE);
            let w = prior_weights[i] * var;
            working[i] = w * (eta[i] + (y[i] - mu[i]) / var);
            xw.row_mut(i).scale_mut(w);
        }

        // X'WX and X'Wz
        let xtwx = xw.tr_mul(x);
        let xtwz = x.tr_mul(&working);

        let chol = Cholesky::new(xtwx.clone())
            .filter(|c| full_rank(c.l_dirty(), &xtwx))
            .ok_or_else(|| EstimationError::SingularDesign {
                model: model.to_string(),
            })?;
        let beta = chol.solve(&xtwz);

        let eta_vec = x * &beta;
        eta = eta_vec.iter().copied().collect();
        mu = eta.iter().map(|&e| sigmoid(e)).collect();

        let dev = deviance(y, &mu, prior_weights);
        if !dev.is_finite() {
            return Err(EstimationError::NonConvergence {
                model: model.to_string(),
                iterations: iteration,
            });
        }

        if (dev - dev_old).abs() / (dev.abs() + 0.1) < settings.tolerance {
            if mu
                .iter()
                .any(|&m| m < PROBABILITY_EPS || m > 1.0 - PROBABILITY_EPS)
            {
                return Err(EstimationError::Separation {
                    model: model.to_string(),
                });
            }
            debug!(model, iterations = iteration, deviance = dev, "propensity model converged");
            return Ok(LogisticFit {
                coefficients: beta,
                fitted: mu,
                iterations: iteration,
                deviance: dev,
            });
        }
        dev_old = dev;
    }

    Err(EstimationError::NonConvergence {
        model: model.to_string(),
        iterations: settings.max_iterations,
    })
}
