use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the random "luck" terms used when scoring.
///
/// Injected into the scorer so callers control variance: a seeded source
/// reproduces a run, `NoLuck` removes the random terms entirely.
pub trait LuckSource {
    /// Draw a value uniformly from `[low, high]`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

/// Luck drawn from a seedable `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededLuck {
    rng: StdRng,
}

impl SeededLuck {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl LuckSource for SeededLuck {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.rng.gen_range(low..=high)
    }
}

/// Always draws zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLuck;

impl LuckSource for NoLuck {
    fn uniform(&mut self, _low: f64, _high: f64) -> f64 {
        0.0
    }
}
