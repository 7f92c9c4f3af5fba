use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of randomness for food placement and AI exploration
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`; `len` must be non-zero
    fn next_index(&mut self, len: usize) -> usize;
}

/// Seeded RNG owned by a single game session
#[derive(Debug, Clone)]
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SessionRng {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}
