//! Sources of uniform random integers for maze generation.
//!
//! Generation only ever asks for a value in `[0, n)`, so the source is a single method trait.
//! Production code wraps any `rand` generator; tests substitute a fixed sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// A uniformly distributed integer in `[0, max_exclusive)`. `max_exclusive` is never zero.
    fn next_random(&mut self, max_exclusive: usize) -> usize;
}

impl<'a, R: RandomSource + ?Sized> RandomSource for &'a mut R {
    fn next_random(&mut self, max_exclusive: usize) -> usize {
        (**self).next_random(max_exclusive)
    }
}

/// Adapts a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng>(pub R);

impl RngSource<StdRng> {
    /// Reproducible source: the same seed always yields the same maze.
    pub fn seeded(seed: u64) -> RngSource<StdRng> {
        RngSource(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> RngSource<StdRng> {
        RngSource(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_random(&mut self, max_exclusive: usize) -> usize {
        self.0.gen_range(0..max_exclusive)
    }
}

/// Replays a fixed list of values, wrapping around at the end.
///
/// Values are handed out unchanged, whatever `max_exclusive` is asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceSource {
    values: Vec<usize>,
    position: usize,
}

impl SequenceSource {
    /// Panics if `values` is empty.
    pub fn new(values: Vec<usize>) -> SequenceSource {
        assert!(!values.is_empty(), "a sequence source needs at least one value");
        SequenceSource { values, position: 0 }
    }

    /// Always answers zero: the first candidate every time.
    pub fn zeros() -> SequenceSource {
        SequenceSource::new(vec![0])
    }
}

impl RandomSource for SequenceSource {
    fn next_random(&mut self, _max_exclusive: usize) -> usize {
        let value = self.values[self.position];
        self.position = (self.position + 1) % self.values.len();
        value
    }
}
