use serde::{Deserialize, Serialize};

/// Content of one grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    /// Crossword filler, drawn as `#`.
    Blocked,
    Letter(char),
    /// Crossword letter that starts clue `number`.
    Numbered { number: u16, letter: char },
}

impl Cell {
    pub const fn letter(self) -> Option<char> {
        match self {
            Self::Letter(letter) | Self::Numbered { letter, .. } => Some(letter),
            Self::Empty | Self::Blocked => None,
        }
    }

    pub const fn number(self) -> Option<u16> {
        match self {
            Self::Numbered { number, .. } => Some(number),
            _ => None,
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked)
    }

    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Blocked => '#',
            Self::Letter(letter) | Self::Numbered { letter, .. } => letter,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}
