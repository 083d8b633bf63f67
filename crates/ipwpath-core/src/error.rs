//! Error types for path-specific effect estimation.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Fatal errors raised while validating inputs or estimating effects.
///
/// Every variant aborts the whole call; no partial point estimate or
/// replicate ensemble is ever returned alongside an error.
#[derive(Debug, Error)]
pub enum Error {
    /// A named column does not exist in the dataset.
    #[error("column '{name}' not found in dataset")]
    UnknownColumn {
        /// The missing column name.
        name: String,
    },

    /// The exposure column holds categorical values.
    #[error("exposure '{column}' must be numeric")]
    NonNumericExposure {
        /// Exposure column name.
        column: String,
    },

    /// The outcome column holds categorical values.
    #[error("outcome '{column}' must be numeric")]
    NonNumericOutcome {
        /// Outcome column name.
        column: String,
    },

    /// The outcome column holds NaN or an infinite value.
    #[error("outcome '{column}' must be finite, found {value} at row {row}")]
    NonFiniteOutcome {
        /// Outcome column name.
        column: String,
        /// The offending value.
        value: f64,
        /// Zero-based row index of the first offending value.
        row: usize,
    },

    /// The exposure column contains missing values.
    #[error("exposure '{column}' contains {count} missing value(s)")]
    MissingExposure {
        /// Exposure column name.
        column: String,
        /// Number of missing cells.
        count: usize,
    },

    /// The exposure column contains a value other than 0 or 1.
    #[error("exposure '{column}' must be coded 0/1, found {value} at row {row}")]
    NonBinaryExposure {
        /// Exposure column name.
        column: String,
        /// The offending value.
        value: f64,
        /// Zero-based row index of the first offending value.
        row: usize,
    },

    /// No mediators were supplied.
    #[error("at least one mediator is required")]
    NoMediators,

    /// The dataset has no rows.
    #[error("dataset has no rows")]
    EmptyDataset,

    /// Option values outside their valid range.
    #[error("invalid options: {message}")]
    InvalidOptions {
        /// Description of the problem.
        message: String,
    },

    /// Parallel execution was requested but is not compiled in.
    #[error("parallel bootstrap requested but the `parallel` feature is not enabled")]
    ParallelUnavailable,

    /// The worker pool could not be constructed.
    #[error("failed to build worker pool: {message}")]
    WorkerPool {
        /// Underlying failure.
        message: String,
    },

    /// The natural-effect estimator failed for a mediator subset.
    #[error("natural-effect estimation failed for the first {mediators} mediator(s)")]
    Estimation {
        /// Size k of the mediator subset being estimated.
        mediators: usize,
        /// Failure reported by the estimator.
        #[source]
        source: EstimationError,
    },
}

/// Failures reported by a natural-effect estimator.
///
/// This is the error half of the estimator contract: implementations map
/// their internal failures onto these variants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationError {
    /// The exposure does not vary in the data being fit.
    #[error("exposure '{column}' is constant; propensity scores are not identified")]
    DegenerateExposure {
        /// Exposure column name.
        column: String,
    },

    /// The propensity model did not converge.
    #[error("propensity model '{model}' did not converge after {iterations} iterations")]
    NonConvergence {
        /// The model formula.
        model: String,
        /// Iterations performed.
        iterations: usize,
    },

    /// Fitted probabilities of exactly 0 or 1 occurred.
    #[error("propensity model '{model}' is separated: fitted probabilities numerically 0 or 1")]
    Separation {
        /// The model formula.
        model: String,
    },

    /// The design matrix is rank deficient.
    #[error("propensity model '{model}' has a singular design matrix")]
    SingularDesign {
        /// The model formula.
        model: String,
    },

    /// A column used by the estimator has missing values.
    #[error("column '{column}' contains missing values")]
    MissingValues {
        /// Column name.
        column: String,
    },

    /// Base weights are unusable.
    #[error("invalid base weights in '{column}': {reason}")]
    InvalidWeights {
        /// Base-weight column name.
        column: String,
        /// Description of the problem.
        reason: String,
    },

    /// An exposure group carries no weight.
    #[error("no weighted observations with exposure = {level}")]
    EmptyGroup {
        /// Exposure level (0 or 1).
        level: u8,
    },

    /// Any other estimator failure.
    #[error("{0}")]
    Other(String),
}
