use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use wordy_protocol::DailyPuzzleRecord;

use crate::*;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

const DAILY_KINDS: [PuzzleKind; 3] = [PuzzleKind::WordSearch, PuzzleKind::Crossword, PuzzleKind::Hangman];

/// One bonus puzzle per calendar day, paid once.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPuzzle {
    date: Date,
    kind: PuzzleKind,
    completed: bool,
}

impl DailyPuzzle {
    pub fn roll(date: Date, rng: &mut impl RandomSource) -> Self {
        let kind = DAILY_KINDS[rng.next_index(DAILY_KINDS.len())];
        log::debug!("Daily puzzle for {date} is {kind:?}");
        Self {
            date,
            kind,
            completed: false,
        }
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn kind(&self) -> PuzzleKind {
        self.kind
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Rolls a new puzzle when `today` is not the stored date. Returns whether it did.
    pub fn refresh(&mut self, today: Date, rng: &mut impl RandomSource) -> bool {
        if self.date == today {
            return false;
        }
        *self = Self::roll(today, rng);
        true
    }

    /// Pays the daily reward the first time it is called for this day.
    pub fn complete(&mut self, progression: &mut impl LevelProgression, config: &EngineConfig) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        progression.award(to_delta(config.economy.daily_reward));
        true
    }

    pub fn to_record(&self) -> DailyPuzzleRecord {
        // the format only has numeric components
        let date = self.date.format(DATE_FORMAT).unwrap_or_default();
        DailyPuzzleRecord {
            date,
            puzzle: self.kind,
            completed: self.completed,
        }
    }

    pub fn from_record(record: &DailyPuzzleRecord) -> core::result::Result<Self, time::error::Parse> {
        Ok(Self {
            date: Date::parse(&record.date, DATE_FORMAT)?,
            kind: record.puzzle,
            completed: record.completed,
        })
    }
}
