//! Statistical methods for bootstrap inference.
//!
//! This module provides the resampling and summary machinery used by the
//! bootstrap orchestrator:
//! - Quantile computation with linear interpolation between order statistics
//! - Row resampling with replacement and counter-based per-replicate seeding
//! - Percentile confidence intervals and sign-based two-sided p-values

mod inference;
mod quantile;
mod resample;

pub use inference::{percentile_interval, sign_p_value};
pub use quantile::{compute_quantile, compute_quantile_sorted, compute_quantiles};
pub use resample::{counter_rng_seed, resample_indices, resample_indices_into};
