//! JSON serialization for path-specific effect estimates.

use ipwpath_core::PathEstimate;

/// Serialize a PathEstimate to a compact JSON string.
///
/// Non-finite effects are written as `null`, so such output does not
/// deserialize back into a `PathEstimate`.
///
/// # Errors
///
/// Returns an error if the underlying serializer fails.
pub fn to_json(estimate: &PathEstimate) -> Result<String, serde_json::Error> {
    serde_json::to_string(estimate)
}

/// Serialize a PathEstimate to a pretty-printed JSON string.
///
/// Non-finite effects are written as `null`, so such output does not
/// deserialize back into a `PathEstimate`.
///
/// # Errors
///
/// Returns an error if the underlying serializer fails.
pub fn to_json_pretty(estimate: &PathEstimate) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(estimate)
}
