//! Quantile computation using Type 7 quantiles (linear interpolation).
//!
//! **Type 7 formula** (for sorted sample x of size n at probability p,
//! 0-based indexing):
//! ```text
//! h = (n - 1) * p
//! q = x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])
//! ```
//!
//! This is the default of most statistical packages and the usual choice for
//! percentile bootstrap intervals.
//!
//! # Reference
//!
//! Hyndman, R. J. & Fan, Y. (1996). "Sample quantiles in statistical packages."
//! The American Statistician 50(4):361–365.

/// Compute a single quantile from a mutable slice using Type 7 quantiles.
///
/// Uses `select_nth_unstable_by()` for O(n) expected time complexity.
/// The slice is partially reordered as a side effect.
///
/// # Arguments
///
/// * `data` - Mutable slice of values (will be partially reordered)
/// * `p` - Quantile probability in [0, 1]
///
/// # Panics
///
/// Panics if `data` is empty or if `p` is outside [0, 1].
pub fn compute_quantile(data: &mut [f64], p: f64) -> f64 {
    assert!(!data.is_empty(), "Cannot compute quantile of empty slice");
    assert!(
        (0.0..=1.0).contains(&p),
        "Quantile probability must be in [0, 1]"
    );

    let n = data.len();
    if n == 1 {
        return data[0];
    }

    let h = (n - 1) as f64 * p;
    let lo = (h.floor() as usize).min(n - 1);
    let frac = h - lo as f64;

    let (_, &mut lo_val, upper) = data.select_nth_unstable_by(lo, |a, b| a.total_cmp(b));
    if frac == 0.0 || upper.is_empty() {
        return lo_val;
    }

    // The next order statistic is the minimum of the upper partition
    let hi_val = upper
        .iter()
        .copied()
        .min_by(|a, b| a.total_cmp(b))
        .unwrap_or(lo_val);

    lo_val + frac * (hi_val - lo_val)
}

/// Compute a quantile from pre-sorted data.
///
/// # Panics
///
/// Panics if `sorted` is empty or if `p` is outside [0, 1].
pub fn compute_quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "Cannot compute quantile of empty slice");
    assert!(
        (0.0..=1.0).contains(&p),
        "Quantile probability must be in [0, 1]"
    );

    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = (h.floor() as usize).min(n - 1);
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;

    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Compute several quantiles of `data`, sorting a copy once.
///
/// # Panics
///
/// Panics if `data` is empty or any probability is outside [0, 1].
pub fn compute_quantiles(data: &[f64], probs: &[f64]) -> Vec<f64> {
    assert!(!data.is_empty(), "Cannot compute quantiles of empty slice");

    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));

    probs
        .iter()
        .map(|&p| compute_quantile_sorted(&sorted, p))
        .collect()
}
