//! Result types for path-specific effect estimation.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Path effects
// ============================================================================

/// A named path-specific effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathEffect {
    /// Path label, e.g. `D->M2->Y`.
    pub name: String,
    /// Estimated effect.
    pub value: f64,
}

impl PathEffect {
    /// Create a named effect.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Ordered path-specific effects. Order is the decomposition's output order,
/// with the direct path first and the path through the first mediator last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathEffects {
    entries: Vec<PathEffect>,
}

impl PathEffects {
    /// Number of effects (K + 1).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no effects.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Effect names in order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Effect values in order.
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.value).collect()
    }

    /// Sum of all effects; equals the ATE up to rounding.
    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|e| e.value).sum()
    }

    /// Look up an effect by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.value)
    }

    /// Iterate over the effects.
    pub fn iter(&self) -> std::slice::Iter<'_, PathEffect> {
        self.entries.iter()
    }
}

impl From<Vec<PathEffect>> for PathEffects {
    fn from(entries: Vec<PathEffect>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a PathEffects {
    type Item = &'a PathEffect;
    type IntoIter = std::slice::Iter<'a, PathEffect>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ============================================================================
// Bootstrap outputs
// ============================================================================

/// How bootstrap replications were executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// One worker, one random stream seeded once.
    Serial,
    /// A pool of workers, one counter-seeded stream per replicate.
    Parallel {
        /// Number of worker threads.
        workers: usize,
    },
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Serial => write!(f, "serial"),
            ExecutionMode::Parallel { workers } => write!(f, "parallel ({} workers)", workers),
        }
    }
}

/// B x (K + 2) table of bootstrap replicates.
///
/// Column 0 is the ATE; the remaining columns follow the point estimate's
/// path-effect order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicateSet {
    names: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ReplicateSet {
    /// Create an empty table with the given column names.
    pub fn new(names: Vec<String>) -> Self {
        Self {
            names,
            rows: Vec::new(),
        }
    }

    /// Append one replicate row.
    ///
    /// # Panics
    ///
    /// Panics if the row width differs from the number of columns.
    pub fn push(&mut self, row: Vec<f64>) {
        assert_eq!(row.len(), self.names.len(), "replicate row width mismatch");
        self.rows.push(row);
    }

    /// Column names (ATE first).
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of replicates B.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of estimands K + 2.
    pub fn n_cols(&self) -> usize {
        self.names.len()
    }

    /// All replicate rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Values of column `j` across replicates.
    pub fn column(&self, j: usize) -> Vec<f64> {
        self.rows.iter().map(|r| r[j]).collect()
    }

    /// Values of the named column across replicates.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<f64>> {
        self.names.iter().position(|n| n == name).map(|j| self.column(j))
    }
}

/// Percentile interval for one estimand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectInterval {
    /// Estimand name (`ATE` or a path label).
    pub name: String,
    /// Lower bound (the alpha/2 quantile).
    pub lower: f64,
    /// Upper bound (the 1 - alpha/2 quantile).
    pub upper: f64,
}

impl EffectInterval {
    /// Whether the interval contains `x`.
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }
}

/// Two-sided bootstrap p-value for one estimand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectPValue {
    /// Estimand name (`ATE` or a path label).
    pub name: String,
    /// p-value in [0, 1].
    pub p_value: f64,
}

/// Inference derived from the replicate ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapSummary {
    /// Number of replications B.
    pub replications: usize,
    /// Confidence level of the intervals.
    pub confidence_level: f64,
    /// Seed that generated the replicates.
    pub seed: u64,
    /// How the replications were executed.
    pub mode: ExecutionMode,
    /// One interval per estimand, ATE first.
    pub intervals: Vec<EffectInterval>,
    /// One p-value per estimand, ATE first.
    pub p_values: Vec<EffectPValue>,
    /// The raw replicates.
    pub replicates: ReplicateSet,
}

impl BootstrapSummary {
    /// Interval for the named estimand.
    pub fn interval(&self, name: &str) -> Option<&EffectInterval> {
        self.intervals.iter().find(|i| i.name == name)
    }

    /// p-value for the named estimand.
    pub fn p_value(&self, name: &str) -> Option<f64> {
        self.p_values.iter().find(|p| p.name == name).map(|p| p.p_value)
    }
}

// ============================================================================
// Advisories
// ============================================================================

/// Non-fatal conditions noticed during estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Advisory {
    /// Parallel execution was requested with fewer than two workers.
    DegradedToSerial {
        /// Requested worker count.
        requested_workers: usize,
    },
    /// Base sampling weights were combined with a simple row bootstrap.
    ///
    /// The resampling ignores unequal selection probabilities, stratification
    /// and clustering, so intervals may be invalid under complex designs.
    BaseWeightsWithBootstrap {
        /// Base-weight column name.
        column: String,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::DegradedToSerial { requested_workers } => write!(
                f,
                "parallel bootstrap needs at least 2 workers ({} requested); ran serially",
                requested_workers
            ),
            Advisory::BaseWeightsWithBootstrap { column } => write!(
                f,
                "base weights '{}' used with bootstrap: resampling ignores the sampling design \
                 (unequal selection, strata, clusters); intervals may be invalid",
                column
            ),
        }
    }
}

// ============================================================================
// Top-level estimate
// ============================================================================

/// Point estimate plus optional bootstrap inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathEstimate {
    /// Total effect.
    pub ate: f64,
    /// K + 1 path-specific effects.
    pub effects: PathEffects,
    /// Present when bootstrap inference was requested.
    pub bootstrap: Option<BootstrapSummary>,
    /// Non-fatal advisories raised during the call.
    pub advisories: Vec<Advisory>,
}

impl PathEstimate {
    /// Estimand names in replicate-table order: `ATE` followed by the paths.
    pub fn estimand_names(&self) -> Vec<String> {
        std::iter::once(crate::constants::LABEL_ATE.to_string())
            .chain(self.effects.iter().map(|e| e.name.clone()))
            .collect()
    }
}
