use alloc::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HangmanState {
    Playing,
    Won,
    Lost,
}

impl HangmanState {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Result of a guess or hint
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Letter was tried before, nothing changed.
    AlreadyGuessed,
    Hit,
    Miss,
    Won,
    Lost,
}

impl GuessOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::AlreadyGuessed)
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Guessing game over a single target word.
#[derive(Clone, Debug)]
pub struct Hangman {
    level: LevelId,
    word: Word,
    revealed: Vec<bool>,
    guessed: BTreeSet<char>,
    wrong_guesses: u8,
    max_wrong_guesses: u8,
    state: HangmanState,
    economy: Economy,
}

impl Hangman {
    pub fn new(level: LevelId, word: Word, config: &EngineConfig) -> Self {
        Self {
            level,
            revealed: vec![false; word.len()],
            word,
            guessed: BTreeSet::new(),
            wrong_guesses: 0,
            max_wrong_guesses: config.hangman.max_wrong_guesses,
            state: HangmanState::Playing,
            economy: config.economy,
        }
    }

    /// Starts a game on a random candidate.
    pub fn pick(
        level: LevelId,
        candidates: &[Word],
        config: &EngineConfig,
        rng: &mut impl RandomSource,
    ) -> Result<Self> {
        let word = rng.pick(candidates).ok_or(PuzzleError::InsufficientWords {
            required: 1,
            available: 0,
        })?;
        Ok(Self::new(level, word.clone(), config))
    }

    pub fn level(&self) -> LevelId {
        self.level
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn clue(&self) -> Option<&str> {
        self.word.clue()
    }

    pub fn state(&self) -> HangmanState {
        self.state
    }

    pub fn wrong_guesses(&self) -> u8 {
        self.wrong_guesses
    }

    pub fn remaining_attempts(&self) -> u8 {
        self.max_wrong_guesses.saturating_sub(self.wrong_guesses)
    }

    pub fn guessed(&self) -> impl Iterator<Item = char> + '_ {
        self.guessed.iter().copied()
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// The target with hidden letters shown as `_`.
    pub fn masked(&self) -> String {
        self.word
            .letters()
            .zip(&self.revealed)
            .map(|(letter, &shown)| if shown { letter } else { '_' })
            .collect()
    }

    /// Guesses a letter, case-insensitively. Winning pays out and completes the level through `progression`.
    pub fn guess(
        &mut self,
        letter: char,
        progression: &mut impl LevelProgression,
    ) -> Result<GuessOutcome> {
        self.check_active()?;
        if !letter.is_ascii_alphabetic() {
            return Err(PuzzleError::InvalidLetter);
        }

        let letter = letter.to_ascii_uppercase();
        if !self.guessed.insert(letter) {
            return Ok(GuessOutcome::AlreadyGuessed);
        }

        let mut hit = false;
        for (shown, target) in self.revealed.iter_mut().zip(self.word.letters()) {
            if target == letter {
                *shown = true;
                hit = true;
            }
        }

        if hit {
            Ok(self.check_won(progression))
        } else {
            self.wrong_guesses += 1;
            if self.wrong_guesses >= self.max_wrong_guesses {
                log::debug!("Hangman on level {} lost, word was {}", self.level, self.word.answer());
                self.state = HangmanState::Lost;
                Ok(GuessOutcome::Lost)
            } else {
                Ok(GuessOutcome::Miss)
            }
        }
    }

    /// Reveals one random hidden position. Does not count as a guess.
    pub fn hint(
        &mut self,
        progression: &mut impl LevelProgression,
        rng: &mut impl RandomSource,
    ) -> Result<GuessOutcome> {
        self.check_active()?;

        let hidden: Vec<usize> = self
            .revealed
            .iter()
            .enumerate()
            .filter(|(_, shown)| !**shown)
            .map(|(index, _)| index)
            .collect();
        let &index = rng.pick(&hidden).ok_or(PuzzleError::NothingToReveal)?;

        charge(progression, self.economy.hangman_hint_cost)?;
        self.revealed[index] = true;
        Ok(self.check_won(progression))
    }

    fn check_won(&mut self, progression: &mut impl LevelProgression) -> GuessOutcome {
        if !self.revealed.iter().all(|&shown| shown) {
            return GuessOutcome::Hit;
        }

        log::debug!("Hangman on level {} won", self.level);
        self.state = HangmanState::Won;
        progression.award(to_delta(self.economy.hangman_reward));
        progression.complete(self.level);
        GuessOutcome::Won
    }

    fn check_active(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(PuzzleError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
