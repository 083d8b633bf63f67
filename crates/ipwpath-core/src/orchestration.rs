//! End-to-end estimation: validation, point estimate, bootstrap inference.

use tracing::{debug, warn};

use crate::bootstrap::{run_replicates, summarize, BootstrapOptions, Executor, WorkerPool};
use crate::decompose::decompose;
use crate::error::Result;
use crate::estimator::NaturalEffectEstimator;
use crate::result::{Advisory, BootstrapSummary, PathEstimate};
use crate::types::{Dataset, VariableRoles, WeightOptions};
use crate::validation::{validate_inputs, validate_weight_options};

/// Options for one estimation call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EstimateOptions {
    /// Weight stabilization and censoring.
    pub weights: WeightOptions,
    /// Bootstrap settings; `None` skips inference.
    pub bootstrap: Option<BootstrapOptions>,
}

/// Estimate the ATE and path-specific effects, with optional bootstrap inference.
///
/// All preconditions (columns present, binary fully observed numeric
/// exposure, numeric outcome, valid options, availability of parallel
/// execution) are checked before any model is fit. Any estimator failure,
/// on the full data or on a resample, aborts the call.
///
/// # Arguments
///
/// * `data` - The dataset
/// * `roles` - Exposure, ordered mediators, outcome, covariates, base weights
/// * `options` - Weight handling and bootstrap settings
/// * `estimator` - Natural-effect estimator applied to each mediator subset
pub fn estimate<E>(
    data: &Dataset,
    roles: &VariableRoles,
    options: &EstimateOptions,
    estimator: &E,
) -> Result<PathEstimate>
where
    E: NaturalEffectEstimator + ?Sized,
{
    validate_inputs(data, roles)?;
    validate_weight_options(&options.weights)?;

    let mut advisories = Vec::new();

    let executor = match &options.bootstrap {
        Some(boot) => {
            boot.validate()?;
            let executor = Executor::select(boot.parallel, boot.workers, &mut advisories)?;
            if let Some(column) = &roles.base_weights {
                let advisory = Advisory::BaseWeightsWithBootstrap {
                    column: column.clone(),
                };
                warn!("{}", advisory);
                advisories.push(advisory);
            }
            Some((boot, executor))
        }
        None => None,
    };

    debug!(
        rows = data.n_rows(),
        mediators = roles.n_mediators(),
        "computing point estimate"
    );
    let point = decompose(data, roles, options.weights, estimator)?;

    let mut estimate = PathEstimate {
        ate: point.ate,
        effects: point.effects,
        bootstrap: None,
        advisories,
    };

    if let Some((boot, executor)) = executor {
        let replicates = run_replicates(
            &executor,
            data,
            roles,
            options.weights,
            estimator,
            boot.replications,
            boot.seed,
            estimate.estimand_names(),
        )?;
        let (intervals, p_values) = summarize(&replicates, boot.confidence_level);
        estimate.bootstrap = Some(BootstrapSummary {
            replications: boot.replications,
            confidence_level: boot.confidence_level,
            seed: boot.seed,
            mode: executor.mode(),
            intervals,
            p_values,
            replicates,
        });
    }

    Ok(estimate)
}
