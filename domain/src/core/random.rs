//! Injected randomness
//!
//! Uniform picks (initial activation, administrative rotation, letter reuse)
//! go through [`RandomSource`] so a seed makes them reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random indices
pub trait RandomSource: Send {
    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Pick a uniformly random element, `None` for an empty slice
pub fn choose<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.pick_index(items.len()))
}

/// [`RandomSource`] backed by a seedable standard RNG
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Reproducible stream for a given seed
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Stream seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index called with an empty range");
        if len <= 1 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}
