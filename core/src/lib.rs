extern crate alloc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use wordy_protocol::WordEntry;

pub use cell::*;
pub use config::*;
pub use crossword::*;
pub use daily::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use hangman::*;
pub use progression::*;
pub use random::*;
pub use search::*;
pub use source::*;
pub use timer::*;
pub use types::*;

mod cell;
mod config;
mod crossword;
mod daily;
mod error;
mod generator;
mod grid;
mod hangman;
mod progression;
mod random;
mod search;
mod source;
mod timer;
mod types;

/// Cells covered by one placement. Most words fit inline.
pub type CellRun = SmallVec<[Coord2; 16]>;

/// Puzzle answer with an optional clue. The answer is uppercase ASCII letters only.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    answer: String,
    clue: Option<String>,
}

impl Word {
    pub fn new(answer: &str, clue: Option<&str>) -> Result<Self> {
        let answer = answer.trim();
        if answer.is_empty() || !answer.chars().all(|letter| letter.is_ascii_alphabetic()) {
            return Err(PuzzleError::InvalidWord);
        }

        let clue = clue.map(str::trim).filter(|clue| !clue.is_empty());
        Ok(Self {
            answer: answer.to_ascii_uppercase(),
            clue: clue.map(String::from),
        })
    }

    pub fn from_entry(entry: &WordEntry) -> Result<Self> {
        Self::new(entry.answer(), entry.clue())
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn clue(&self) -> Option<&str> {
        self.clue.as_deref()
    }

    pub fn len(&self) -> usize {
        self.answer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answer.is_empty()
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.answer.chars()
    }
}

/// Where a word sits on the grid. `order_index` is 1-based and numbers crossword clues.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    word: Word,
    origin: Coord2,
    direction: Direction,
    order_index: u16,
}

impl Placement {
    pub fn new(word: Word, origin: Coord2, direction: Direction, order_index: u16) -> Self {
        Self {
            word,
            origin,
            direction,
            order_index,
        }
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn origin(&self) -> Coord2 {
        self.origin
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn order_index(&self) -> u16 {
        self.order_index
    }

    /// Covered cells, first letter first. Only meaningful for placements that fit their grid.
    pub fn cells(&self) -> CellRun {
        let (d_row, d_col) = self.direction.delta();
        (0..self.word.len() as isize)
            .map(|step| {
                let row = isize::from(self.origin.0) + d_row * step;
                let col = isize::from(self.origin.1) + d_col * step;
                (row as Coord, col as Coord)
            })
            .collect()
    }

    pub fn end(&self) -> Coord2 {
        let (d_row, d_col) = self.direction.delta();
        let last = self.word.len().saturating_sub(1) as isize;
        (
            (isize::from(self.origin.0) + d_row * last) as Coord,
            (isize::from(self.origin.1) + d_col * last) as Coord,
        )
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.cells().contains(&coords)
    }

    fn fits(&self, size: Coord2) -> bool {
        let last = self.word.len().saturating_sub(1) as isize;
        offset(self.origin, self.direction.delta(), 0, size).is_some()
            && offset(self.origin, self.direction.delta(), last, size).is_some()
    }
}

/// Generated board together with the words placed on it. Read-only once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    grid: Grid,
    placements: Vec<Placement>,
    dropped: Vec<Word>,
}

impl Puzzle {
    pub(crate) fn new_unchecked(grid: Grid, placements: Vec<Placement>, dropped: Vec<Word>) -> Self {
        Self {
            grid,
            placements,
            dropped,
        }
    }

    /// Assembles a puzzle from a finished grid, checking every placement lies on matching letters.
    pub fn from_parts(grid: Grid, placements: Vec<Placement>) -> Result<Self> {
        for placement in &placements {
            if !placement.fits(grid.size()) {
                return Err(PuzzleError::InvalidCoords);
            }
            let matches = placement
                .cells()
                .into_iter()
                .zip(placement.word().letters())
                .all(|(coords, letter)| grid.letter_at(coords) == Some(letter));
            if !matches {
                return Err(PuzzleError::ShapeMismatch);
            }
        }

        Ok(Self::new_unchecked(grid, placements, Vec::new()))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Words that could not be placed within the retry bound.
    pub fn dropped(&self) -> &[Word] {
        &self.dropped
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Fails with `InsufficientWords` when nothing could be placed.
    pub(crate) fn ensure_playable(&self) -> Result<()> {
        if self.placements.is_empty() {
            Err(PuzzleError::InsufficientWords {
                required: 1,
                available: 0,
            })
        } else {
            Ok(())
        }
    }
}
