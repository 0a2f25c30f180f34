//! Random selection abstraction.
//!
//! The only random decision in a round is the survivor fallback in outcome
//! parsing. It goes through this trait so that tests (and replays) can make
//! the pick deterministic.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random index selection.
pub trait DeterministicRng: Send {
    /// Returns an index in `[0, len)`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Production RNG seeded from the operating system.
#[derive(Debug)]
pub struct OsSeededRng(StdRng);

impl OsSeededRng {
    /// Creates a new RNG seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Creates an RNG with a fixed seed, for reproducible games.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for OsSeededRng {
    fn default() -> Self {
        Self::new()
    }
}

impl DeterministicRng for OsSeededRng {
    fn pick_index(&mut self, len: usize) -> usize {
        self.0.random_range(0..len.max(1))
    }
}
