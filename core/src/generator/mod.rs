use serde::{Deserialize, Serialize};

use crate::*;
pub use placer::*;
pub use words::*;

mod placer;
mod words;

pub trait PuzzleGenerator {
    fn generate(self, words: &[Word]) -> Puzzle;
}

/// Which directions words may run in and whether they may share cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Geometry {
    /// Word search: four reading directions, no shared cells, leftovers filled with random letters.
    Linear4,
    /// Crossword: across and down only, crossings on identical letters, leftovers blocked.
    CrossingOrtho,
}

impl Geometry {
    pub const fn directions(self) -> &'static [Direction] {
        match self {
            Self::Linear4 => &Direction::LINEAR,
            Self::CrossingOrtho => &Direction::ORTHOGONAL,
        }
    }

    pub const fn allows_crossing(self) -> bool {
        matches!(self, Self::CrossingOrtho)
    }

    pub const fn default_retries(self) -> usize {
        match self {
            Self::Linear4 => 50,
            Self::CrossingOrtho => 100,
        }
    }
}

/// Seeded generator, so the same seed and words always give the same puzzle.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomPuzzleGenerator {
    seed: u64,
    size: Coord2,
    geometry: Geometry,
    retries: usize,
}

impl RandomPuzzleGenerator {
    pub fn new(seed: u64, size: Coord2, geometry: Geometry) -> Self {
        Self {
            seed,
            size,
            geometry,
            retries: geometry.default_retries(),
        }
    }

    pub fn with_retries(self, retries: usize) -> Self {
        Self { retries, ..self }
    }
}

impl PuzzleGenerator for RandomPuzzleGenerator {
    fn generate(self, words: &[Word]) -> Puzzle {
        let mut rng = puzzle_rng(self.seed);
        place(words, self.size, self.geometry, self.retries, &mut rng)
    }
}
