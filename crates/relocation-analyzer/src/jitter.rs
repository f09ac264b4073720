//! Display-only score perturbation
//!
//! Adds a small uniform offset to a clamped score so that near-identical
//! countries do not render with the same value. The generator is seeded
//! explicitly, so two runs with the same seed print the same numbers.

use crate::round1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Maximum absolute offset added to a score
pub const JITTER_AMPLITUDE: f64 = 0.15;

/// Seeded source of score perturbations
#[derive(Debug, Clone)]
pub struct ScoreJitter {
    seed: u64,
    rng: StdRng,
}

impl ScoreJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Next offset in [-JITTER_AMPLITUDE, +JITTER_AMPLITUDE]
    pub fn offset(&mut self) -> f64 {
        self.rng.gen_range(-JITTER_AMPLITUDE..=JITTER_AMPLITUDE)
    }

    /// Perturb a clamped, unrounded score and round to one decimal
    pub fn apply(&mut self, clamped: f64) -> f64 {
        round1(clamped + self.offset())
    }
}
