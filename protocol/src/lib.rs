//! Documents exchanged between the puzzle engine and its collaborators: the bundled word list, the saved
//! progress record and the daily puzzle record.

use serde::{Deserialize, Serialize};

/// Bundled word list, `{"words": [...]}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordListDocument {
    #[serde(default)]
    pub words: Vec<WordEntry>,
}

impl WordListDocument {
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// A word list entry is either a bare string or an answer with an optional clue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WordEntry {
    Plain(String),
    Clued {
        answer: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        clue: Option<String>,
    },
}

impl WordEntry {
    pub fn answer(&self) -> &str {
        match self {
            Self::Plain(answer) => answer,
            Self::Clued { answer, .. } => answer,
        }
    }

    pub fn clue(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::Clued { clue, .. } => clue.as_deref(),
        }
    }
}

/// Player progress as stored by the persistence layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    #[serde(default = "default_level")]
    pub current_level: u32,
    #[serde(default = "default_coins")]
    pub coins: u32,
    #[serde(default)]
    pub completed_levels: Vec<u32>,
}

const fn default_level() -> u32 {
    1
}

const fn default_coins() -> u32 {
    10
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self {
            current_level: default_level(),
            coins: default_coins(),
            completed_levels: Vec::new(),
        }
    }
}

/// Which minigame a level or daily puzzle plays.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PuzzleKind {
    WordSearch,
    Crossword,
    Hangman,
}

/// Daily puzzle record, `date` formatted as `YYYY-MM-DD`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPuzzleRecord {
    pub date: String,
    pub puzzle: PuzzleKind,
    #[serde(default)]
    pub completed: bool,
}
