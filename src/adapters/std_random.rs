//! Random source backed by `rand`'s `StdRng`.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::ports::RandomSource;

/// Production random source, optionally seeded for reproducible runs.
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
    seed: Option<u64>,
}

impl StdRandom {
    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
            seed: None,
        }
    }

    /// Deterministic source for reproducible selections.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}
