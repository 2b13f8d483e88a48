use serde::{Deserialize, Serialize};

use crate::*;

/// All-or-nothing check: every letter of every placement must be entered correctly.
pub fn validate_answers(placements: &[Placement], answers: &AnswerGrid) -> bool {
    placements.iter().all(|placement| {
        placement
            .cells()
            .into_iter()
            .zip(placement.word().letters())
            .all(|(coords, letter)| answers.entry(coords) == Some(letter))
    })
}

/// Fills the correct letter into one random cell of one random placement.
///
/// Returns the updated answers and the coins spent. The chosen cell may already be correct. `answers` is never
/// touched, so a failed hint leaves the caller's state as it was.
pub fn apply_hint(
    placements: &[Placement],
    answers: &AnswerGrid,
    coins: Coins,
    cost: Coins,
    rng: &mut impl RandomSource,
) -> Result<(AnswerGrid, Coins)> {
    if coins < cost {
        return Err(PuzzleError::InsufficientCoins {
            needed: cost,
            available: coins,
        });
    }

    let placement = rng.pick(placements).ok_or(PuzzleError::NothingToReveal)?;
    let step = rng.next_index(placement.word().len());
    let (coords, letter) = placement
        .cells()
        .into_iter()
        .zip(placement.word().letters())
        .nth(step)
        .ok_or(PuzzleError::NothingToReveal)?;

    let mut updated = answers.clone();
    updated.fill(coords, letter)?;
    Ok((updated, cost))
}

/// Fills every placement in one go. Same coin contract as [`apply_hint`].
pub fn solve_answers(
    placements: &[Placement],
    answers: &AnswerGrid,
    coins: Coins,
    cost: Coins,
) -> Result<(AnswerGrid, Coins)> {
    if coins < cost {
        return Err(PuzzleError::InsufficientCoins {
            needed: cost,
            available: coins,
        });
    }

    let mut updated = answers.clone();
    for placement in placements {
        for (coords, letter) in placement.cells().into_iter().zip(placement.word().letters()) {
            updated.fill(coords, letter)?;
        }
    }
    Ok((updated, cost))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrosswordState {
    Active,
    Solved,
}

/// Numbered clues split by direction, each list in clue number order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClueList<'a> {
    pub across: Vec<(u16, &'a str)>,
    pub down: Vec<(u16, &'a str)>,
}

#[derive(Clone, Debug)]
pub struct Crossword {
    level: LevelId,
    puzzle: Puzzle,
    answers: AnswerGrid,
    state: CrosswordState,
    economy: Economy,
}

impl Crossword {
    pub fn new(level: LevelId, puzzle: Puzzle, config: &EngineConfig) -> Result<Self> {
        puzzle.ensure_playable()?;
        Ok(Self {
            level,
            answers: AnswerGrid::new(puzzle.size()),
            puzzle,
            state: CrosswordState::Active,
            economy: config.economy,
        })
    }

    /// Lays out the clued candidates on a square grid.
    pub fn generate(
        level: LevelId,
        candidates: &[Word],
        config: &EngineConfig,
        rng: &mut impl RandomSource,
    ) -> Result<Self> {
        let rules = config.crossword;
        let words = select_crossword_words(candidates, rules.size, rules.max_words);
        if words.is_empty() {
            return Err(PuzzleError::InsufficientWords {
                required: 1,
                available: 0,
            });
        }

        let puzzle = place(
            &words,
            (rules.size, rules.size),
            Geometry::CrossingOrtho,
            rules.retries,
            rng,
        );
        Self::new(level, puzzle, config)
    }

    pub fn level(&self) -> LevelId {
        self.level
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn grid(&self) -> &Grid {
        self.puzzle.grid()
    }

    pub fn answers(&self) -> &AnswerGrid {
        &self.answers
    }

    pub fn state(&self) -> CrosswordState {
        self.state
    }

    /// Clue numbers are the ones shown on the grid, so words sharing a start cell share a number.
    pub fn clues(&self) -> ClueList<'_> {
        let mut clues = ClueList::default();
        for placement in self.puzzle.placements() {
            let number = self
                .grid()
                .cell_at(placement.origin())
                .number()
                .unwrap_or(placement.order_index());
            let entry = (number, placement.word().clue().unwrap_or_default());
            match placement.direction() {
                Direction::Horizontal => clues.across.push(entry),
                _ => clues.down.push(entry),
            }
        }
        clues
    }

    /// Writes the player's letter into a cell. Only cells that belong to a word accept input.
    pub fn enter(&mut self, coords: Coord2, letter: char) -> Result<()> {
        self.check_active()?;
        self.check_open(coords)?;
        self.answers.fill(coords, letter)
    }

    pub fn clear(&mut self, coords: Coord2) -> Result<()> {
        self.check_active()?;
        self.check_open(coords)?;
        self.answers.clear(coords)
    }

    pub fn hint(
        &mut self,
        progression: &mut impl LevelProgression,
        rng: &mut impl RandomSource,
    ) -> Result<()> {
        self.check_active()?;
        let (answers, spent) = apply_hint(
            self.puzzle.placements(),
            &self.answers,
            progression.coins(),
            self.economy.crossword_hint_cost,
            rng,
        )?;
        progression.award(-to_delta(spent));
        self.answers = answers;
        Ok(())
    }

    /// Fills in the whole solution. The player still has to submit it.
    pub fn solve(&mut self, progression: &mut impl LevelProgression) -> Result<()> {
        self.check_active()?;
        let (answers, spent) = solve_answers(
            self.puzzle.placements(),
            &self.answers,
            progression.coins(),
            self.economy.crossword_solve_cost,
        )?;
        progression.award(-to_delta(spent));
        self.answers = answers;
        Ok(())
    }

    /// Checks the entered answers. A correct grid pays out and completes the level.
    pub fn submit(&mut self, progression: &mut impl LevelProgression) -> Result<bool> {
        self.check_active()?;
        if !validate_answers(self.puzzle.placements(), &self.answers) {
            return Ok(false);
        }

        log::debug!("Crossword on level {} solved", self.level);
        self.state = CrosswordState::Solved;
        progression.award(to_delta(self.economy.crossword_reward));
        progression.complete(self.level);
        Ok(true)
    }

    fn check_open(&self, coords: Coord2) -> Result<()> {
        let coords = self.grid().validate_coords(coords)?;
        if self.grid().letter_at(coords).is_none() {
            return Err(PuzzleError::InvalidCoords);
        }
        Ok(())
    }

    fn check_active(&self) -> Result<()> {
        match self.state {
            CrosswordState::Active => Ok(()),
            CrosswordState::Solved => Err(PuzzleError::AlreadyEnded),
        }
    }
}
