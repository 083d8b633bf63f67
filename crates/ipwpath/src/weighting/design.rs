//! Column extraction and design matrices for propensity models.

use nalgebra::DMatrix;

use ipwpath_core::{Column, Dataset, EstimationError};

/// A fully observed numeric column.
pub fn numeric_column(data: &Dataset, name: &str) -> Result<Vec<f64>, EstimationError> {
    match data.column(name) {
        Some(Column::Numeric(values)) => values
            .iter()
            .map(|v| {
                v.ok_or_else(|| EstimationError::MissingValues {
                    column: name.to_string(),
                })
            })
            .collect(),
        Some(Column::Categorical(_)) => Err(EstimationError::Other(format!(
            "column '{}' must be numeric",
            name
        ))),
        None => Err(EstimationError::Other(format!(
            "column '{}' not found in dataset",
            name
        ))),
    }
}

/// Build `[1 | predictors]` for a logistic model.
///
/// Numeric predictors enter as-is. Categorical predictors are dummy-coded
/// against their first level in sorted order; levels are taken from `data`
/// itself, so a resample that lost a level simply has fewer columns.
/// Returns the matrix and its column names.
pub fn design_matrix(
    data: &Dataset,
    predictors: &[String],
) -> Result<(DMatrix<f64>, Vec<String>), EstimationError> {
    let n = data.n_rows();
    let mut columns: Vec<Vec<f64>> = vec![vec![1.0; n]];
    let mut terms = vec!["(Intercept)".to_string()];

    for name in predictors {
        match data.column(name) {
            Some(Column::Numeric(_)) => {
                columns.push(numeric_column(data, name)?);
                terms.push(name.clone());
            }
            Some(Column::Categorical(values)) => {
                let cells = values
                    .iter()
                    .map(|v| {
                        v.as_deref().ok_or_else(|| EstimationError::MissingValues {
                            column: name.clone(),
                        })
                    })
                    .collect::<Result<Vec<&str>, _>>()?;

                let mut levels = cells.clone();
                levels.sort_unstable();
                levels.dedup();

                for level in levels.iter().skip(1) {
                    columns.push(
                        cells
                            .iter()
                            .map(|c| if c == level { 1.0 } else { 0.0 })
                            .collect(),
                    );
                    terms.push(format!("{}[{}]", name, level));
                }
            }
            None => {
                return Err(EstimationError::Other(format!(
                    "column '{}' not found in dataset",
                    name
                )))
            }
        }
    }

    let p = columns.len();
    let matrix = DMatrix::from_fn(n, p, |i, j| columns[j][i]);
    Ok((matrix, terms))
}
