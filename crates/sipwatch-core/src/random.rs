//! Random sources feeding the telemetry generator.
//!
//! The generator only ever asks for a uniform draw in `[0, 1)` and scales it
//! into a half-open integer range, so a test can pin every field by handing
//! it a [`ConstantSource`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A stream of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<S: RandomSource + ?Sized> RandomSource for Box<S> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Draw an integer from `[lo, hi)` as `lo + floor(u * (hi - lo))`.
///
/// Out-of-range draws (≥ 1, negative, NaN) are clamped so the result always
/// lands inside the range. An empty range returns `lo`.
pub fn draw_range(source: &mut impl RandomSource, lo: u64, hi: u64) -> u64 {
    let u = source.next_unit();
    if hi <= lo {
        return lo;
    }
    let span = hi - lo;
    let u = if u.is_nan() { 0.0 } else { u.clamp(0.0, 1.0) };
    let offset = ((u * span as f64).floor() as u64).min(span - 1);
    lo + offset
}

/// Adapter over any [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Reproducible stream: the same seed yields the same snapshots.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Stream seeded from operating-system entropy.
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        // Standard f64 sampling is uniform over [0, 1).
        self.rng.random::<f64>()
    }
}

/// Returns the same draw forever.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSource(pub f64);

impl RandomSource for ConstantSource {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSource {
    draws: Vec<f64>,
    pos: usize,
}

impl SequenceSource {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, pos: 0 }
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let u = self.draws[self.pos % self.draws.len()];
        self.pos = self.pos.wrapping_add(1);
        u
    }
}
