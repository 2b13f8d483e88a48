use thiserror::Error;

use crate::Coins;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Not enough coins, need {needed} but only have {available}")]
    InsufficientCoins { needed: Coins, available: Coins },
    #[error("Selection is not a straight line")]
    NotALine,
    #[error("Not enough valid words, need {required} but only have {available}")]
    InsufficientWords { required: usize, available: usize },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Words must be non-empty and contain only letters")]
    InvalidWord,
    #[error("Guesses and entries must be a single letter")]
    InvalidLetter,
    #[error("Puzzle already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Nothing left to reveal")]
    NothingToReveal,
    #[error("Placements do not match the grid")]
    ShapeMismatch,
}

pub type Result<T> = core::result::Result<T, PuzzleError>;
