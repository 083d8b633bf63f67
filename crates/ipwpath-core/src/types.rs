//! Dataset model and variable roles.

use std::collections::HashMap;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Dataset
// ============================================================================

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// A numeric value.
    Numeric(f64),
    /// A categorical level.
    Categorical(String),
    /// A missing cell.
    Missing,
}

/// A typed column. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    /// Numeric column.
    Numeric(Vec<Option<f64>>),
    /// Categorical column.
    Categorical(Vec<Option<String>>),
}

impl Column {
    /// Number of cells.
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Categorical(v) => v.len(),
        }
    }

    /// Whether the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the column is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Numeric(_))
    }

    /// Numeric cells, or `None` for a categorical column.
    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match self {
            Column::Numeric(v) => Some(v),
            Column::Categorical(_) => None,
        }
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        match self {
            Column::Numeric(v) => v.iter().filter(|x| x.is_none()).count(),
            Column::Categorical(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    /// Cell at `row` as a [`Value`].
    pub fn value(&self, row: usize) -> Value {
        match self {
            Column::Numeric(v) => v[row].map_or(Value::Missing, Value::Numeric),
            Column::Categorical(v) => v[row]
                .as_ref()
                .map_or(Value::Missing, |s| Value::Categorical(s.clone())),
        }
    }

    fn select(&self, rows: &[usize]) -> Column {
        match self {
            Column::Numeric(v) => Column::Numeric(rows.iter().map(|&i| v[i]).collect()),
            Column::Categorical(v) => {
                Column::Categorical(rows.iter().map(|&i| v[i].clone()).collect())
            }
        }
    }
}

/// An ordered collection of rows stored column by column.
///
/// Datasets are immutable once built; resampling produces an independent
/// snapshot rather than modifying the original.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fully observed numeric column.
    ///
    /// # Panics
    ///
    /// Panics if the column length differs from existing columns or the name
    /// is already taken.
    pub fn with_numeric(self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.with_column(name, Column::Numeric(values.into_iter().map(Some).collect()))
    }

    /// Add a numeric column with possibly missing cells.
    pub fn with_numeric_opt(self, name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        self.with_column(name, Column::Numeric(values))
    }

    /// Add a categorical column.
    pub fn with_categorical<S: Into<String>>(
        self,
        name: impl Into<String>,
        values: Vec<Option<S>>,
    ) -> Self {
        let values = values.into_iter().map(|v| v.map(Into::into)).collect();
        self.with_column(name, Column::Categorical(values))
    }

    /// Add an arbitrary column.
    ///
    /// # Panics
    ///
    /// Panics if the column length differs from existing columns or the name
    /// is already taken.
    pub fn with_column(mut self, name: impl Into<String>, column: Column) -> Self {
        let name = name.into();
        assert!(
            !self.names.contains(&name),
            "duplicate column name '{}'",
            name
        );
        if self.columns.is_empty() {
            self.n_rows = column.len();
        } else {
            assert_eq!(
                column.len(),
                self.n_rows,
                "column '{}' has {} rows, dataset has {}",
                name,
                column.len(),
                self.n_rows
            );
        }
        self.names.push(name);
        self.columns.push(column);
        self
    }

    /// Build a dataset from row maps.
    ///
    /// A column is numeric when no row holds a categorical value for it.
    /// Keys absent from a row are treated as missing.
    pub fn from_rows(rows: &[HashMap<String, Value>]) -> Self {
        let mut names: Vec<String> = rows.iter().flat_map(|r| r.keys().cloned()).collect();
        names.sort();
        names.dedup();

        let mut dataset = Dataset::new();
        for name in names {
            let is_categorical = rows
                .iter()
                .any(|r| matches!(r.get(&name), Some(Value::Categorical(_))));
            let column = if is_categorical {
                Column::Categorical(
                    rows.iter()
                        .map(|r| match r.get(&name) {
                            Some(Value::Categorical(s)) => Some(s.clone()),
                            Some(Value::Numeric(x)) => Some(x.to_string()),
                            _ => None,
                        })
                        .collect(),
                )
            } else {
                Column::Numeric(
                    rows.iter()
                        .map(|r| match r.get(&name) {
                            Some(Value::Numeric(x)) => Some(*x),
                            _ => None,
                        })
                        .collect(),
                )
            };
            dataset = dataset.with_column(name, column);
        }
        if dataset.columns.is_empty() {
            dataset.n_rows = rows.len();
        }
        dataset
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.columns[i])
    }

    /// Look up a column by name, failing with [`Error::UnknownColumn`].
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| Error::UnknownColumn {
            name: name.to_string(),
        })
    }

    /// A row as a map from column name to value.
    pub fn row(&self, index: usize) -> HashMap<String, Value> {
        self.names
            .iter()
            .zip(&self.columns)
            .map(|(n, c)| (n.clone(), c.value(index)))
            .collect()
    }

    /// A new dataset made of the given rows, in the given order.
    ///
    /// Indices may repeat.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    pub fn select_rows(&self, rows: &[usize]) -> Dataset {
        Dataset {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.select(rows)).collect(),
            n_rows: rows.len(),
        }
    }

    /// Draw a resample of the same size by sampling rows with replacement.
    pub fn resample<R: Rng + ?Sized>(&self, rng: &mut R) -> Dataset {
        let indices = crate::statistics::resample_indices(self.n_rows, rng);
        self.select_rows(&indices)
    }
}

// ============================================================================
// Variable roles
// ============================================================================

/// Column roles for a path-specific effect analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableRoles {
    /// Binary (0/1) exposure column.
    pub exposure: String,
    /// Mediators in causal order, earliest first.
    pub mediators: Vec<String>,
    /// Numeric outcome column.
    pub outcome: String,
    /// Pre-exposure covariates.
    pub covariates: Vec<String>,
    /// Optional base sampling weights column.
    pub base_weights: Option<String>,
}

impl VariableRoles {
    /// Roles without covariates or base weights.
    pub fn new(
        exposure: impl Into<String>,
        mediators: impl IntoIterator<Item = impl Into<String>>,
        outcome: impl Into<String>,
    ) -> Self {
        Self {
            exposure: exposure.into(),
            mediators: mediators.into_iter().map(Into::into).collect(),
            outcome: outcome.into(),
            covariates: Vec::new(),
            base_weights: None,
        }
    }

    /// Set the covariates.
    pub fn with_covariates(mut self, covariates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.covariates = covariates.into_iter().map(Into::into).collect();
        self
    }

    /// Set the base weights column.
    pub fn with_base_weights(mut self, column: impl Into<String>) -> Self {
        self.base_weights = Some(column.into());
        self
    }

    /// Number of mediators K.
    pub fn n_mediators(&self) -> usize {
        self.mediators.len()
    }
}

// ============================================================================
// Propensity specifications and estimator options
// ============================================================================

/// A propensity-score model for the exposure: `exposure ~ predictors`.
///
/// An empty predictor list means an intercept-only model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropensitySpec {
    /// Response (the exposure).
    pub response: String,
    /// Predictor columns.
    pub predictors: Vec<String>,
}

impl PropensitySpec {
    /// Exposure regressed on covariates only.
    pub fn baseline(roles: &VariableRoles) -> Self {
        Self {
            response: roles.exposure.clone(),
            predictors: roles.covariates.clone(),
        }
    }

    /// Exposure regressed on the first `k` mediators plus covariates.
    pub fn augmented(roles: &VariableRoles, k: usize) -> Self {
        let predictors = roles.mediators[..k]
            .iter()
            .chain(&roles.covariates)
            .cloned()
            .collect();
        Self {
            response: roles.exposure.clone(),
            predictors,
        }
    }
}

impl fmt::Display for PropensitySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.predictors.is_empty() {
            write!(f, "{} ~ 1", self.response)
        } else {
            write!(f, "{} ~ {}", self.response, self.predictors.join(" + "))
        }
    }
}

/// Weight handling passed through to the natural-effect estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightOptions {
    /// Multiply weights by the marginal exposure probability.
    pub stabilize: bool,
    /// Winsorize weights at `censor_low` / `censor_high` quantiles.
    pub censor: bool,
    /// Lower censoring quantile in [0, 1].
    pub censor_low: f64,
    /// Upper censoring quantile in [0, 1].
    pub censor_high: f64,
}

impl Default for WeightOptions {
    fn default() -> Self {
        Self {
            stabilize: true,
            censor: true,
            censor_low: crate::constants::DEFAULT_CENSOR_LOW,
            censor_high: crate::constants::DEFAULT_CENSOR_HIGH,
        }
    }
}

/// Natural effects for one mediator subset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NaturalEffects {
    /// Average total effect.
    pub ate: f64,
    /// Natural direct effect, bypassing the subset.
    pub nde: f64,
    /// Natural indirect effect, through the subset.
    pub nie: f64,
}
