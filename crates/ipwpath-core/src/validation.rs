//! Input checks performed before any model is fit.

use crate::error::{Error, Result};
use crate::types::{Column, Dataset, VariableRoles, WeightOptions};

/// Check the dataset and roles for fatal precondition violations.
///
/// In order:
/// 1. the dataset has rows and at least one mediator is named;
/// 2. every named column exists;
/// 3. the exposure is numeric, fully observed and coded 0/1;
/// 4. the outcome is numeric and its observed values are finite.
pub fn validate_inputs(data: &Dataset, roles: &VariableRoles) -> Result<()> {
    if data.is_empty() {
        return Err(Error::EmptyDataset);
    }
    if roles.mediators.is_empty() {
        return Err(Error::NoMediators);
    }

    let named = std::iter::once(&roles.exposure)
        .chain(&roles.mediators)
        .chain(std::iter::once(&roles.outcome))
        .chain(&roles.covariates)
        .chain(roles.base_weights.iter());
    for name in named {
        data.require(name)?;
    }

    validate_exposure(data, &roles.exposure)?;

    let outcome = match data.require(&roles.outcome)? {
        Column::Numeric(values) => values,
        Column::Categorical(_) => {
            return Err(Error::NonNumericOutcome {
                column: roles.outcome.clone(),
            })
        }
    };
    if let Some((row, value)) = outcome
        .iter()
        .enumerate()
        .find_map(|(row, v)| v.filter(|x| !x.is_finite()).map(|x| (row, x)))
    {
        return Err(Error::NonFiniteOutcome {
            column: roles.outcome.clone(),
            value,
            row,
        });
    }

    Ok(())
}

/// Check that the exposure is numeric, has no missing values and only 0/1.
pub fn validate_exposure(data: &Dataset, exposure: &str) -> Result<()> {
    let values = match data.require(exposure)? {
        Column::Numeric(values) => values,
        Column::Categorical(_) => {
            return Err(Error::NonNumericExposure {
                column: exposure.to_string(),
            })
        }
    };

    let missing = values.iter().filter(|v| v.is_none()).count();
    if missing > 0 {
        return Err(Error::MissingExposure {
            column: exposure.to_string(),
            count: missing,
        });
    }

    if let Some((row, value)) = values
        .iter()
        .flatten()
        .copied()
        .enumerate()
        .find(|&(_, x)| x != 0.0 && x != 1.0)
    {
        return Err(Error::NonBinaryExposure {
            column: exposure.to_string(),
            value,
            row,
        });
    }

    Ok(())
}

/// Check censoring bounds: 0 <= low < high <= 1 when censoring is enabled.
pub fn validate_weight_options(options: &WeightOptions) -> Result<()> {
    if !options.censor {
        return Ok(());
    }
    let in_unit = |x: f64| (0.0..=1.0).contains(&x);
    if !in_unit(options.censor_low) || !in_unit(options.censor_high) {
        return Err(Error::InvalidOptions {
            message: format!(
                "censor quantiles must be in [0, 1], got ({}, {})",
                options.censor_low, options.censor_high
            ),
        });
    }
    if options.censor_low >= options.censor_high {
        return Err(Error::InvalidOptions {
            message: format!(
                "censor_low ({}) must be < censor_high ({})",
                options.censor_low, options.censor_high
            ),
        });
    }
    Ok(())
}
