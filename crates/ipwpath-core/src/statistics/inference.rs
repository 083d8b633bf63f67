//! Percentile intervals and sign-based p-values from bootstrap replicates.

use super::quantile::compute_quantile_sorted;

/// Percentile bootstrap interval at the given confidence level.
///
/// Returns the alpha/2 and 1 - alpha/2 empirical quantiles of `replicates`,
/// where alpha = 1 - `confidence_level`. No bias correction or acceleration.
///
/// # Panics
///
/// Panics if `replicates` is empty or `confidence_level` is outside (0, 1).
pub fn percentile_interval(replicates: &[f64], confidence_level: f64) -> (f64, f64) {
    assert!(!replicates.is_empty(), "Cannot compute interval of empty slice");
    assert!(
        confidence_level > 0.0 && confidence_level < 1.0,
        "confidence_level must be in (0, 1)"
    );

    let alpha = 1.0 - confidence_level;
    let mut sorted = replicates.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));

    (
        compute_quantile_sorted(&sorted, alpha / 2.0),
        compute_quantile_sorted(&sorted, 1.0 - alpha / 2.0),
    )
}

/// Two-sided p-value for a zero effect from the sign distribution of replicates.
///
/// ```text
/// p = 2 * min(P*(theta < 0), P*(theta > 0))
/// ```
///
/// Replicates exactly equal to zero count toward neither side, so the
/// result always lies in [0, 1].
///
/// # Panics
///
/// Panics if `replicates` is empty.
pub fn sign_p_value(replicates: &[f64]) -> f64 {
    assert!(!replicates.is_empty(), "Cannot compute p-value of empty slice");

    let n = replicates.len() as f64;
    let below = replicates.iter().filter(|&&x| x < 0.0).count() as f64 / n;
    let above = replicates.iter().filter(|&&x| x > 0.0).count() as f64 / n;

    (2.0 * below.min(above)).min(1.0)
}
