use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::PatternSelector;

/// Uniform pattern choice driven by an injected RNG.
pub struct RandomSelector<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSelector<ChaCha8Rng> {
    /// Reproducible selector: the same seed always yields the same rounds.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> PatternSelector for RandomSelector<R> {
    fn select(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Deterministic selector cycling through fixed catalog indices.
#[derive(Debug, Clone)]
pub struct SequenceSelector {
    indices: Vec<usize>,
    cursor: usize,
}

impl SequenceSelector {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices, cursor: 0 }
    }

    /// Always picks the same pattern.
    pub fn repeat(index: usize) -> Self {
        Self::new(vec![index])
    }
}

impl PatternSelector for SequenceSelector {
    fn select(&mut self, len: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let index = self.indices[self.cursor % self.indices.len()];
        self.cursor += 1;
        index % len
    }
}
