//! Nonparametric bootstrap of the path decomposition.
//!
//! Each replicate resamples the dataset's rows with replacement, reruns the
//! full decomposition and records `(ATE, PSE_1, ..., PSE_{K+1})`. The
//! replicate table then yields percentile intervals and sign p-values for
//! every estimand independently.

mod pool;

pub use pool::{Executor, SerialPool, TaskRng, WorkerPool};
#[cfg(feature = "parallel")]
pub use pool::RayonPool;

use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::constants::{DEFAULT_CONFIDENCE_LEVEL, DEFAULT_REPLICATIONS, DEFAULT_SEED};
use crate::decompose::decompose;
use crate::error::{Error, Result};
use crate::estimator::NaturalEffectEstimator;
use crate::result::{EffectInterval, EffectPValue, ReplicateSet};
use crate::statistics::{percentile_interval, sign_p_value};
use crate::types::{Dataset, VariableRoles, WeightOptions};

/// Bootstrap settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapOptions {
    /// Number of replications B.
    pub replications: usize,
    /// Confidence level of the percentile intervals, in (0, 1).
    pub confidence_level: f64,
    /// Seed for the replicate random streams.
    pub seed: u64,
    /// Run replications on a worker pool.
    pub parallel: bool,
    /// Requested worker count for parallel runs.
    pub workers: usize,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            replications: DEFAULT_REPLICATIONS,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            seed: DEFAULT_SEED,
            parallel: false,
            workers: 1,
        }
    }
}

impl BootstrapOptions {
    /// Check replications and confidence level.
    pub fn validate(&self) -> Result<()> {
        if self.replications == 0 {
            return Err(Error::InvalidOptions {
                message: "replications must be > 0".to_string(),
            });
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(Error::InvalidOptions {
                message: format!(
                    "confidence_level must be in (0, 1), got {}",
                    self.confidence_level
                ),
            });
        }
        Ok(())
    }
}

/// Run `replications` resample-and-decompose replicates on `pool`.
///
/// `names` are the column names of the resulting table (ATE first, then the
/// point estimate's path labels). The first failing replicate aborts the run.
#[allow(clippy::too_many_arguments)]
pub fn run_replicates<P, E>(
    pool: &P,
    data: &Dataset,
    roles: &VariableRoles,
    weights: WeightOptions,
    estimator: &E,
    replications: usize,
    seed: u64,
    names: Vec<String>,
) -> Result<ReplicateSet>
where
    P: WorkerPool,
    E: NaturalEffectEstimator + ?Sized,
{
    info!(
        replications,
        mode = %pool.mode(),
        rows = data.n_rows(),
        "starting bootstrap"
    );

    let rows = pool.try_map_independent(seed, replications, |i, rng| {
        let resample = data.resample(rng);
        let replicate = decompose(&resample, roles, weights, estimator)?;
        trace!(replicate = i, ate = replicate.ate, "bootstrap replicate");
        Ok::<_, Error>(
            std::iter::once(replicate.ate)
                .chain(replicate.effects.values())
                .collect::<Vec<f64>>(),
        )
    })?;

    let mut table = ReplicateSet::new(names);
    for row in rows {
        table.push(row);
    }

    info!(replications = table.n_rows(), "bootstrap finished");
    Ok(table)
}

/// Percentile intervals and sign p-values for every column of `replicates`.
///
/// # Panics
///
/// Panics if the table is empty or `confidence_level` is outside (0, 1).
pub fn summarize(
    replicates: &ReplicateSet,
    confidence_level: f64,
) -> (Vec<EffectInterval>, Vec<EffectPValue>) {
    replicates
        .names()
        .iter()
        .enumerate()
        .map(|(j, name)| {
            let column = replicates.column(j);
            let (lower, upper) = percentile_interval(&column, confidence_level);
            (
                EffectInterval {
                    name: name.clone(),
                    lower,
                    upper,
                },
                EffectPValue {
                    name: name.clone(),
                    p_value: sign_p_value(&column),
                },
            )
        })
        .unzip()
}
