//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use lastlight_core::rng::DeterministicRng;

/// An RNG that always picks index 0. Suitable for tests that do not depend
/// on which candidate is chosen, or that expect the first one.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn pick_index(&mut self, _len: usize) -> usize {
        0
    }
}

/// An RNG that returns indices from a predetermined sequence, each clamped
/// into range. Panics if the sequence is exhausted.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<usize>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    #[must_use]
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, index: 0 }
    }
}

impl DeterministicRng for SequenceRng {
    fn pick_index(&mut self, len: usize) -> usize {
        let val = self.values[self.index];
        self.index += 1;
        val.min(len.saturating_sub(1))
    }
}
