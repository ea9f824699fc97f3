//! Standard-normal variates via the Box-Muller transform.
//!
//! Each normal consumes two fresh uniforms and only the cosine branch is kept.
//! The sine companion is discarded so the number of draws taken from the
//! underlying source is always exactly two per variate.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Distribution;
use std::f64::consts::PI;

/// Box-Muller sampler producing `N(0, 1)` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxMuller;

impl Distribution<f64> for BoxMuller {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u1 = nonzero_uniform(rng);
        let u2 = nonzero_uniform(rng);
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }
}

/// Uniform draw on `(0, 1)`; zero is re-drawn since `ln(0)` is undefined.
fn nonzero_uniform<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let u: f64 = rng.random();
        if u != 0.0 {
            return u;
        }
    }
}

/// Stream of standard-normal draws over an owned uniform source.
#[derive(Debug, Clone)]
pub struct NormalGenerator<R> {
    rng: R,
}

impl<R: Rng> NormalGenerator<R> {
    /// Wraps an existing random source.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draws one standard-normal value.
    pub fn next_normal(&mut self) -> f64 {
        BoxMuller.sample(&mut self.rng)
    }

    /// Overwrites every element of `out` with a fresh draw, in order.
    pub fn fill(&mut self, out: &mut [f64]) {
        for z in out.iter_mut() {
            *z = self.next_normal();
        }
    }

    /// Draws `n` independent standard-normal values.
    #[must_use]
    pub fn batch(&mut self, n: usize) -> Vec<f64> {
        let mut out = vec![0.0; n];
        self.fill(&mut out);
        out
    }
}

impl NormalGenerator<StdRng> {
    /// Reproducible generator for a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from the operating system.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}
