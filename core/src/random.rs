use rand::prelude::*;
use rand::rngs::SmallRng;

const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Source of uniform random choices used by every randomized operation in the engine.
pub trait RandomSource {
    /// Returns a value in `0..bound`. `bound` must be non-zero.
    fn next_index(&mut self, bound: usize) -> usize;

    /// Fisher-Yates shuffle.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.next_index(items.len()))
        }
    }

    /// Uniform letter from `A` to `Z`.
    fn letter(&mut self) -> char {
        char::from(ALPHABET[self.next_index(ALPHABET.len())])
    }
}

impl RandomSource for SmallRng {
    fn next_index(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

/// Default generator for puzzles, seeded by the caller.
pub fn puzzle_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Replays a fixed sequence of choices, wrapping around at the end. Each value is reduced modulo the
/// requested bound.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedSource {
    values: Vec<usize>,
    position: usize,
}

impl ScriptedSource {
    pub fn new(values: impl Into<Vec<usize>>) -> Self {
        Self {
            values: values.into(),
            position: 0,
        }
    }

    /// Number of choices drawn so far.
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl RandomSource for ScriptedSource {
    fn next_index(&mut self, bound: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value % bound
    }
}
