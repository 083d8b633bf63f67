//! Decomposition of the total effect into path-specific effects.
//!
//! With mediators M1, ..., MK in causal order, the natural direct effect
//! NDE_k with respect to the first k mediators is estimated for k = K down
//! to 1. Consecutive differences of these direct effects isolate the effect
//! flowing through each mediator:
//!
//! ```text
//! PSE[1]     = NDE_K                          D->Y
//! PSE[K-k+1] = NDE_k - NDE_(k+1)              D->M(k+1)->Y or D->M(k+1)~>Y
//! PSE[K+1]   = NIE_1                          D->M1~>Y
//! ```
//!
//! The sum telescopes to NDE_1 + NIE_1 = ATE. A single mediator is reported
//! as the plain (NDE, NIE) pair.

use tracing::debug;

use crate::constants::{LABEL_DIRECT, LABEL_NDE, LABEL_NIE};
use crate::error::{Error, Result};
use crate::estimator::{NaturalEffectEstimator, NaturalEffectRequest};
use crate::result::{PathEffect, PathEffects};
use crate::types::{Dataset, NaturalEffects, PropensitySpec, VariableRoles, WeightOptions};

/// How the natural effects of step k enter the output vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combination {
    /// K = 1: emit (NDE, NIE) directly.
    OnlyOne,
    /// K >= 2, k = K: emit NDE_K as the direct path.
    FirstOfMany,
    /// K >= 2, 1 < k < K: emit NDE_k - NDE_(k+1).
    MiddleOfMany,
    /// K >= 2, k = 1: emit NDE_1 - NDE_2, then NIE_1.
    LastOfMany,
}

impl Combination {
    /// Classify step `k` of a decomposition over `n_mediators` mediators.
    pub fn classify(k: usize, n_mediators: usize) -> Self {
        debug_assert!(k >= 1 && k <= n_mediators);
        if n_mediators == 1 {
            Combination::OnlyOne
        } else if k == n_mediators {
            Combination::FirstOfMany
        } else if k == 1 {
            Combination::LastOfMany
        } else {
            Combination::MiddleOfMany
        }
    }
}

/// Zero-based position of the first entry produced at step `k`.
#[inline]
pub fn pse_index(k: usize, n_mediators: usize) -> usize {
    n_mediators - k
}

/// Label of the path leaving the exposure through mediator `j` (1-based).
///
/// The last mediator reaches the outcome directly (`->`); any earlier one may
/// pass through later mediators on the way (`~>`).
pub fn path_label(j: usize, n_mediators: usize) -> String {
    if j == n_mediators {
        format!("D->M{}->Y", j)
    } else {
        format!("D->M{}~>Y", j)
    }
}

/// Point estimate of the decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    /// Total effect.
    pub ate: f64,
    /// K + 1 path-specific effects summing to `ate`.
    pub effects: PathEffects,
}

/// Accumulator threaded through the reverse iteration.
#[derive(Debug, Default)]
struct FoldState {
    prev_nde: Option<f64>,
    entries: Vec<PathEffect>,
    ate: Option<f64>,
}

/// Apply one step's natural effects to the accumulator.
fn combine(mut state: FoldState, k: usize, n_mediators: usize, fx: NaturalEffects) -> FoldState {
    let diff = |prev: Option<f64>| fx.nde - prev.unwrap_or(0.0);

    match Combination::classify(k, n_mediators) {
        Combination::OnlyOne => {
            state.entries.push(PathEffect::new(LABEL_NDE, fx.nde));
            state.entries.push(PathEffect::new(LABEL_NIE, fx.nie));
            state.ate = Some(fx.ate);
        }
        Combination::FirstOfMany => {
            state.entries.push(PathEffect::new(LABEL_DIRECT, fx.nde));
            state.prev_nde = Some(fx.nde);
        }
        Combination::MiddleOfMany => {
            let value = diff(state.prev_nde);
            state.entries.push(PathEffect::new(path_label(k + 1, n_mediators), value));
            state.prev_nde = Some(fx.nde);
        }
        Combination::LastOfMany => {
            let value = diff(state.prev_nde);
            state.entries.push(PathEffect::new(path_label(k + 1, n_mediators), value));
            state.entries.push(PathEffect::new(path_label(1, n_mediators), fx.nie));
            state.ate = Some(fx.ate);
        }
    }
    debug_assert_eq!(state.entries.len(), pse_index(k, n_mediators) + 1 + usize::from(k == 1));
    state
}

/// Decompose the total effect of the exposure into K + 1 path-specific effects.
///
/// Runs the estimator once per mediator subset, from all K mediators down to
/// the first one. Input validation is the caller's responsibility (see
/// [`crate::validation`]); estimator failures are returned unchanged, tagged
/// with the subset size.
///
/// # Arguments
///
/// * `data` - Dataset holding every column named in `roles`
/// * `roles` - Exposure, ordered mediators, outcome, covariates, base weights
/// * `weights` - Stabilization and censoring options forwarded to the estimator
/// * `estimator` - The natural-effect estimator
pub fn decompose<E>(
    data: &Dataset,
    roles: &VariableRoles,
    weights: WeightOptions,
    estimator: &E,
) -> Result<Decomposition>
where
    E: NaturalEffectEstimator + ?Sized,
{
    let n_mediators = roles.n_mediators();
    if n_mediators == 0 {
        return Err(Error::NoMediators);
    }

    let baseline = PropensitySpec::baseline(roles);

    let state = (1..=n_mediators).rev().try_fold(
        FoldState {
            entries: Vec::with_capacity(n_mediators + 1),
            ..FoldState::default()
        },
        |state, k| {
            let augmented = PropensitySpec::augmented(roles, k);
            let request = NaturalEffectRequest {
                exposure: &roles.exposure,
                mediators: &roles.mediators[..k],
                outcome: &roles.outcome,
                baseline: &baseline,
                augmented: &augmented,
                base_weights: roles.base_weights.as_deref(),
                weights,
            };
            let fx = estimator
                .estimate(data, &request)
                .map_err(|source| Error::Estimation {
                    mediators: k,
                    source,
                })?;
            debug!(
                k,
                ate = fx.ate,
                nde = fx.nde,
                nie = fx.nie,
                model = %augmented,
                "estimated natural effects"
            );
            Ok::<_, Error>(combine(state, k, n_mediators, fx))
        },
    )?;

    let ate = state.ate.unwrap_or(f64::NAN);
    Ok(Decomposition {
        ate,
        effects: PathEffects::from(state.entries),
    })
}
