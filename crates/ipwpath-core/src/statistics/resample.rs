//! Row resampling for the nonparametric bootstrap.

use rand::Rng;

/// Derive the seed of replicate `counter` from a base seed.
///
/// Uses the SplitMix64 finalizer so that nearby counters produce unrelated
/// streams. Every replicate of a parallel bootstrap owns one such stream,
/// which makes its result independent of worker count and scheduling.
#[inline]
pub fn counter_rng_seed(seed: u64, counter: u64) -> u64 {
    let mut z = seed.wrapping_add(counter.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Draw `n` row indices uniformly with replacement from `0..n`.
pub fn resample_indices<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut indices = vec![0; n];
    resample_indices_into(n, rng, &mut indices);
    indices
}

/// Fill `buffer` with indices drawn uniformly with replacement from `0..n`.
///
/// Reusing the buffer avoids an allocation per replicate.
pub fn resample_indices_into<R: Rng + ?Sized>(n: usize, rng: &mut R, buffer: &mut Vec<usize>) {
    buffer.clear();
    if n == 0 {
        return;
    }
    buffer.extend((0..n).map(|_| rng.gen_range(0..n)));
}
