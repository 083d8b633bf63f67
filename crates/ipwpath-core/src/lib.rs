//! Core machinery for inverse-probability-weighted path-specific effects.
//!
//! This crate decomposes the total effect of a binary exposure on an outcome
//! into effects along each causal path through an ordered chain of
//! mediators, and quantifies uncertainty with a nonparametric bootstrap.
//! Fitting the propensity models is delegated to a
//! [`NaturalEffectEstimator`]; this crate only orchestrates the nested
//! estimation problems and the inference.
//!
//! # Features
//!
//! - `parallel` (default): Enable parallel bootstrap replications using rayon
//!
//! # Usage
//!
//! This crate is typically used through the main `ipwpath` crate, which
//! provides a reference estimator, configuration and reporting. It can also
//! be used directly with a custom estimator:
//!
//! ```ignore
//! use ipwpath_core::{estimate, EstimateOptions, VariableRoles};
//!
//! let roles = VariableRoles::new("treated", ["m1", "m2"], "income");
//! let result = estimate(&data, &roles, &EstimateOptions::default(), &my_estimator)?;
//! for effect in &result.effects {
//!     println!("{}: {:.3}", effect.name, effect.value);
//! }
//! ```

pub mod bootstrap;
pub mod constants;
pub mod decompose;
pub mod error;
pub mod estimator;
pub mod orchestration;
pub mod result;
pub mod statistics;
pub mod types;
pub mod validation;

// Re-export commonly used items at crate root
pub use bootstrap::BootstrapOptions;
pub use decompose::{decompose, path_label, Combination, Decomposition};
pub use error::{Error, EstimationError, Result};
pub use estimator::{NaturalEffectEstimator, NaturalEffectRequest};
pub use orchestration::{estimate, EstimateOptions};
pub use result::{
    Advisory, BootstrapSummary, EffectInterval, EffectPValue, ExecutionMode, PathEffect,
    PathEffects, PathEstimate, ReplicateSet,
};
pub use types::{
    Column, Dataset, NaturalEffects, PropensitySpec, Value, VariableRoles, WeightOptions,
};
