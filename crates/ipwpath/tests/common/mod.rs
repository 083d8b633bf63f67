//! Simulated datasets shared by integration tests.

#![allow(dead_code)]

use ipwpath::Dataset;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Population effects of [`mediator_chain`].
pub const TRUE_DIRECT: f64 = 1.0;
/// D -> M2 -> Y: 0.5 * 1.0.
pub const TRUE_VIA_M2: f64 = 0.5;
/// D -> M1 -> Y plus D -> M1 -> M2 -> Y: 0.5 * 0.5 + 0.5 * 0.5 * 1.0.
pub const TRUE_VIA_M1: f64 = 0.5;
/// Sum of the three paths.
pub const TRUE_ATE: f64 = 2.0;

/// Linear Gaussian chain D -> M1 -> M2 -> Y with no covariates.
///
/// ```text
/// D  ~ Bernoulli(0.5)
/// M1 = 0.5 D + e1
/// M2 = 0.5 D + 0.5 M1 + e2
/// Y  = 1.0 D + 0.5 M1 + 1.0 M2 + 0.5 e3
/// ```
pub fn mediator_chain(n: usize, seed: u64) -> Dataset {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0).unwrap();

    let mut d = Vec::with_capacity(n);
    let mut m1 = Vec::with_capacity(n);
    let mut m2 = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    for _ in 0..n {
        let di = if rng.gen_bool(0.5) { 1.0 } else { 0.0 };
        let m1i = 0.5 * di + noise.sample(&mut rng);
        let m2i = 0.5 * di + 0.5 * m1i + noise.sample(&mut rng);
        let yi = di + 0.5 * m1i + m2i + 0.5 * noise.sample(&mut rng);
        d.push(di);
        m1.push(m1i);
        m2.push(m2i);
        y.push(yi);
    }

    Dataset::new()
        .with_numeric("d", d)
        .with_numeric("m1", m1)
        .with_numeric("m2", m2)
        .with_numeric("y", y)
}

/// Like [`mediator_chain`] plus a third mediator M3 and a categorical
/// covariate that shifts exposure probability.
pub fn confounded_chain(n: usize, seed: u64) -> Dataset {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0).unwrap();
    let regions = ["north", "south", "west"];

    let mut region = Vec::with_capacity(n);
    let mut d = Vec::with_capacity(n);
    let mut m1 = Vec::with_capacity(n);
    let mut m2 = Vec::with_capacity(n);
    let mut m3 = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    let mut w = Vec::with_capacity(n);
    for _ in 0..n {
        let r = rng.gen_range(0..regions.len());
        let p = [0.35, 0.5, 0.65][r];
        let di = if rng.gen_bool(p) { 1.0 } else { 0.0 };
        let m1i = 0.4 * di + noise.sample(&mut rng);
        let m2i = 0.3 * di + 0.4 * m1i + noise.sample(&mut rng);
        let m3i = 0.3 * di + 0.3 * m2i + noise.sample(&mut rng);
        let yi = di + 0.5 * m1i + 0.5 * m2i + 0.5 * m3i + 0.3 * r as f64 + noise.sample(&mut rng);
        region.push(Some(regions[r]));
        d.push(di);
        m1.push(m1i);
        m2.push(m2i);
        m3.push(m3i);
        y.push(yi);
        w.push(rng.gen_range(0.5..1.5));
    }

    Dataset::new()
        .with_categorical("region", region)
        .with_numeric("d", d)
        .with_numeric("m1", m1)
        .with_numeric("m2", m2)
        .with_numeric("m3", m3)
        .with_numeric("y", y)
        .with_numeric("w", w)
}
