use alloc::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use wordy_protocol::ProgressSnapshot;

pub use wordy_protocol::PuzzleKind;

use crate::*;

pub type Coins = u32;

/// Signed change to a coin balance; negative when spending.
pub type CoinDelta = i32;

pub type LevelId = u32;

/// Economy and level bookkeeping owned by the host. Puzzle engines only ever request changes through this
/// handle.
pub trait LevelProgression {
    fn coins(&self) -> Coins;

    fn award(&mut self, delta: CoinDelta);

    fn complete(&mut self, level: LevelId);
}

impl<P: LevelProgression + ?Sized> LevelProgression for &mut P {
    fn coins(&self) -> Coins {
        (**self).coins()
    }

    fn award(&mut self, delta: CoinDelta) {
        (**self).award(delta)
    }

    fn complete(&mut self, level: LevelId) {
        (**self).complete(level)
    }
}

/// Spends `cost` coins, or fails leaving the balance untouched.
pub(crate) fn charge(progression: &mut impl LevelProgression, cost: Coins) -> Result<()> {
    let available = progression.coins();
    if available < cost {
        return Err(PuzzleError::InsufficientCoins {
            needed: cost,
            available,
        });
    }
    progression.award(-to_delta(cost));
    Ok(())
}

pub(crate) fn to_delta(coins: Coins) -> CoinDelta {
    coins.try_into().unwrap_or(CoinDelta::MAX)
}

/// Minigame played on a numbered level; levels cycle word search, crossword, hangman.
pub const fn kind_for_level(level: LevelId) -> PuzzleKind {
    match level.saturating_sub(1) % 3 {
        0 => PuzzleKind::WordSearch,
        1 => PuzzleKind::Crossword,
        _ => PuzzleKind::Hangman,
    }
}

/// In-memory level progression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    coins: Coins,
    completed: BTreeSet<LevelId>,
    current_level: LevelId,
}

impl Progress {
    pub fn new(starting_coins: Coins) -> Self {
        Self {
            coins: starting_coins,
            completed: BTreeSet::new(),
            current_level: 1,
        }
    }

    pub fn current_level(&self) -> LevelId {
        self.current_level
    }

    pub fn is_completed(&self, level: LevelId) -> bool {
        self.completed.contains(&level)
    }

    pub fn is_unlocked(&self, level: LevelId) -> bool {
        level == 1 || (level > 1 && self.is_completed(level - 1))
    }

    pub fn completed_levels(&self) -> impl Iterator<Item = LevelId> + '_ {
        self.completed.iter().copied()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            current_level: self.current_level,
            coins: self.coins,
            completed_levels: self.completed.iter().copied().collect(),
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(Economy::default().starting_coins)
    }
}

impl From<ProgressSnapshot> for Progress {
    fn from(snapshot: ProgressSnapshot) -> Self {
        Self {
            coins: snapshot.coins,
            completed: snapshot.completed_levels.into_iter().collect(),
            current_level: snapshot.current_level.max(1),
        }
    }
}

impl LevelProgression for Progress {
    fn coins(&self) -> Coins {
        self.coins
    }

    fn award(&mut self, delta: CoinDelta) {
        self.coins = self.coins.saturating_add_signed(delta);
    }

    fn complete(&mut self, level: LevelId) {
        if self.completed.insert(level) {
            self.current_level = level.saturating_add(1);
            log::debug!("Level {level} completed, now on level {}", self.current_level);
        }
    }
}
