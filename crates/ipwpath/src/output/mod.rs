//! Output formatting for path-specific effect estimates.
//!
//! This module provides formatters for displaying `PathEstimate` in different formats:
//! - Terminal: Human-readable table with colors
//! - JSON: Machine-readable serialization

mod json;
mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::format_estimate;
