use alloc::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use web_time::{Duration, Instant};

use crate::*;

/// Reads the letters under a drag from `start` to `end`, in drag order.
///
/// Only horizontal, vertical and 45 degree drags are lines; anything else is `NotALine`. Dragging backwards
/// reads backwards, so `resolve(a, b)` is always the reverse of `resolve(b, a)`.
pub fn resolve(grid: &Grid, start: Coord2, end: Coord2) -> Result<String> {
    let start = grid.validate_coords(start)?;
    let end = grid.validate_coords(end)?;
    let line = Line::between(start, end).ok_or(PuzzleError::NotALine)?;
    Ok(grid.read(line.cells()))
}

/// Screen area available to the board, in points.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 360,
            height: 640,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardSize {
    Small,
    Medium,
    Large,
    /// Medium board against the clock.
    Timed,
}

impl BoardSize {
    pub const fn is_timed(self) -> bool {
        matches!(self, Self::Timed)
    }

    /// `(rows, cols)` for this size on `viewport`.
    pub fn dimensions(self, viewport: Viewport) -> Coord2 {
        let row_factor = viewport.height / 140;
        let col_factor = viewport.width / 60;
        let ((min_rows, max_rows), (min_cols, max_cols)) = match self {
            Self::Small => ((6, 8), (6, 8)),
            Self::Medium | Self::Timed => ((10, 12), (8, 10)),
            Self::Large => ((12, 14), (8, 10)),
        };
        let clamp = |factor: u32, min: Coord, max: Coord| {
            Coord::try_from(factor.clamp(min.into(), max.into())).unwrap_or(max)
        };
        (
            clamp(row_factor, min_rows, max_rows),
            clamp(col_factor, min_cols, max_cols),
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchState {
    Active,
    Complete,
    TimedOut,
    Abandoned,
}

impl SearchState {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// Outcome of a drag over the board
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectOutcome {
    NoMatch,
    /// Index into the placements of the word just found.
    Found(usize),
    /// The last remaining word was found.
    PuzzleComplete(usize),
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoMatch)
    }
}

/// A word search in progress. Regenerated fresh every time a level is entered.
#[derive(Debug)]
pub struct WordSearch {
    level: LevelId,
    puzzle: Puzzle,
    found: BTreeSet<usize>,
    hinted: BTreeSet<usize>,
    state: SearchState,
    countdown: Countdown,
    timed: bool,
    economy: Economy,
    timed_seconds: u64,
}

impl WordSearch {
    pub fn new(level: LevelId, puzzle: Puzzle, config: &EngineConfig) -> Result<Self> {
        puzzle.ensure_playable()?;
        Ok(Self {
            level,
            puzzle,
            found: BTreeSet::new(),
            hinted: BTreeSet::new(),
            state: SearchState::Active,
            countdown: Countdown::default(),
            timed: false,
            economy: config.economy,
            timed_seconds: config.search.timed_seconds,
        })
    }

    /// Selects words for a `size` board and places them.
    pub fn generate(
        level: LevelId,
        size: Coord2,
        candidates: &[Word],
        config: &EngineConfig,
        rng: &mut impl RandomSource,
    ) -> Result<Self> {
        let words = select_search_words(candidates, size, config.search.max_words, rng)?;
        let puzzle = place(&words, size, Geometry::Linear4, config.search.retries, rng);
        Self::new(level, puzzle, config)
    }

    /// Generates a board of a preset size, starting the countdown at `now` for timed boards.
    pub fn for_board(
        level: LevelId,
        board: BoardSize,
        viewport: Viewport,
        candidates: &[Word],
        config: &EngineConfig,
        rng: &mut impl RandomSource,
        now: Instant,
    ) -> Result<Self> {
        let mut search = Self::generate(level, board.dimensions(viewport), candidates, config, rng)?;
        if board.is_timed() {
            search.start_timer(now);
        }
        Ok(search)
    }

    /// Puts the puzzle against the clock; completing it then pays the timed reward.
    pub fn start_timer(&mut self, now: Instant) {
        if self.state.is_finished() {
            return;
        }
        self.timed = true;
        self.countdown
            .start(Duration::from_secs(self.timed_seconds), now);
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

    pub fn placements(&self) -> &[Placement] {
        self.puzzle.placements()
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn is_timed(&self) -> bool {
        self.timed
    }

    pub fn is_found(&self, index: usize) -> bool {
        self.found.contains(&index)
    }

    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    pub fn remaining_words(&self) -> impl Iterator<Item = &Word> + '_ {
        self.placements()
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.found.contains(index))
            .map(|(_, placement)| placement.word())
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Checks a finished drag against the words not found yet. Completing the puzzle pays out and completes
    /// the level through `progression`. A drag landing after the deadline times the puzzle out instead.
    pub fn select(
        &mut self,
        start: Coord2,
        end: Coord2,
        now: Instant,
        progression: &mut impl LevelProgression,
    ) -> Result<SelectOutcome> {
        self.tick(now);
        self.check_active()?;

        let candidate = resolve(self.grid(), start, end)?;
        let Some(index) = (0..self.placements().len()).find(|index| {
            !self.found.contains(index)
                && self.placements()[*index].word().answer().eq_ignore_ascii_case(&candidate)
        }) else {
            return Ok(SelectOutcome::NoMatch);
        };

        self.found.insert(index);
        log::debug!("Found {candidate}, {} of {}", self.found.len(), self.placements().len());

        if self.found.len() == self.placements().len() {
            self.finish(SearchState::Complete);
            let reward = if self.timed {
                self.economy.timed_search_reward
            } else {
                self.economy.search_reward
            };
            progression.award(to_delta(reward));
            progression.complete(self.level);
            Ok(SelectOutcome::PuzzleComplete(index))
        } else {
            Ok(SelectOutcome::Found(index))
        }
    }

    /// Reveals where the next unfound, unhinted word starts.
    pub fn hint(&mut self, now: Instant, progression: &mut impl LevelProgression) -> Result<Coord2> {
        self.tick(now);
        self.check_active()?;

        let index = (0..self.placements().len())
            .find(|index| !self.found.contains(index) && !self.hinted.contains(index))
            .ok_or(PuzzleError::NothingToReveal)?;

        charge(progression, self.economy.search_hint_cost)?;
        self.hinted.insert(index);
        Ok(self.placements()[index].origin())
    }

    /// Drives the countdown from the host's periodic tick. Expiry ends the puzzle without reward.
    pub fn tick(&mut self, now: Instant) -> CountdownStatus {
        let status = self.countdown.poll(now);
        if status == CountdownStatus::Expired && !self.state.is_finished() {
            log::debug!("Word search on level {} timed out", self.level);
            self.state = SearchState::TimedOut;
        }
        status
    }

    /// Stops the countdown when the player leaves. Safe to call more than once.
    pub fn teardown(&mut self) {
        if !self.state.is_finished() {
            self.state = SearchState::Abandoned;
        }
        self.countdown.cancel();
    }

    fn finish(&mut self, state: SearchState) {
        self.state = state;
        self.countdown.cancel();
    }

    fn check_active(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(PuzzleError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

impl Drop for WordSearch {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(answer: &str) -> Word {
        Word::new(answer, None).unwrap()
    }

    /// 8x8 board with CAT across the top and DOG down the second column.
    fn cat_dog() -> Puzzle {
        let mut source = ScriptedSource::new([0, 0, 0, 2, 1, 1]);
        place(&[word("CAT"), word("DOG")], (8, 8), Geometry::Linear4, 50, &mut source)
    }

    fn search(puzzle: Puzzle) -> WordSearch {
        WordSearch::new(1, puzzle, &EngineConfig::default()).unwrap()
    }

    #[test]
    fn resolve_reads_in_drag_direction() {
        let grid = Grid::from_rows(&["CATS", "OXEN", "WASP"]).unwrap();

        assert_eq!(resolve(&grid, (0, 0), (0, 2)).unwrap(), "CAT");
        assert_eq!(resolve(&grid, (0, 2), (0, 0)).unwrap(), "TAC");
        assert_eq!(resolve(&grid, (0, 0), (2, 0)).unwrap(), "COW");
        assert_eq!(resolve(&grid, (0, 0), (2, 2)).unwrap(), "CXS");
        assert_eq!(resolve(&grid, (2, 0), (0, 2)).unwrap(), "WXT");
        assert_eq!(resolve(&grid, (1, 1), (1, 1)).unwrap(), "X");
    }

    #[test]
    fn resolve_rejects_bad_drags() {
        let grid = Grid::from_rows(&["CATS", "OXEN", "WASP"]).unwrap();

        assert_eq!(resolve(&grid, (0, 0), (1, 2)), Err(PuzzleError::NotALine));
        assert_eq!(resolve(&grid, (0, 0), (3, 0)), Err(PuzzleError::InvalidCoords));
    }

    #[test]
    fn resolve_is_reversible() {
        let mut rng = puzzle_rng(21);
        let puzzle = place(&[word("LEMON")], (9, 9), Geometry::Linear4, 50, &mut rng);
        let grid = puzzle.grid();

        for row in 0..9 {
            for (a, b) in [(0, 8), (2, 5), (7, 1)] {
                let forward = resolve(grid, (row, a), (row, b)).unwrap();
                let backward = resolve(grid, (row, b), (row, a)).unwrap();
                assert_eq!(forward, backward.chars().rev().collect::<String>());
            }
        }
    }

    #[test]
    fn finding_every_word_completes_once() {
        let mut progress = Progress::new(0);
        let mut search = search(cat_dog());

        let cat = search.select((0, 0), (0, 2), Instant::now(), &mut progress).unwrap();
        assert_eq!(cat, SelectOutcome::Found(0));
        assert!(search.is_found(0));

        let dog = search.select((2, 1), (4, 1), Instant::now(), &mut progress).unwrap();
        assert_eq!(dog, SelectOutcome::PuzzleComplete(1));
        assert_eq!(search.state(), SearchState::Complete);
        assert_eq!(progress.coins(), 5);
        assert!(progress.is_completed(1));

        assert_eq!(
            search.select((2, 1), (4, 1), Instant::now(), &mut progress),
            Err(PuzzleError::AlreadyEnded)
        );
        assert_eq!(progress.coins(), 5);
    }

    #[test]
    fn word_is_only_credited_once() {
        let mut progress = Progress::new(0);
        let mut search = search(cat_dog());

        assert_eq!(
            search.select((0, 0), (0, 2), Instant::now(), &mut progress).unwrap(),
            SelectOutcome::Found(0)
        );
        assert_eq!(
            search.select((0, 0), (0, 2), Instant::now(), &mut progress).unwrap(),
            SelectOutcome::NoMatch
        );
        assert_eq!(search.found_count(), 1);
    }

    #[test]
    fn backwards_drag_does_not_match_forward_word() {
        let mut progress = Progress::new(0);
        let mut search = search(cat_dog());

        let outcome = search.select((0, 2), (0, 0), Instant::now(), &mut progress).unwrap();

        assert_eq!(outcome, SelectOutcome::NoMatch);
        assert_eq!(search.remaining_words().count(), 2);
    }

    #[test]
    fn lowercase_board_still_matches() {
        let grid = Grid::from_rows(&["cat.", "...."]).unwrap();
        let placements = vec![Placement::new(word("CAT"), (0, 0), Direction::Horizontal, 1)];
        let mut search = search(Puzzle::from_parts(grid, placements).unwrap());

        let outcome = search.select((0, 0), (0, 2), Instant::now(), &mut Progress::new(0)).unwrap();

        assert_eq!(outcome, SelectOutcome::PuzzleComplete(0));
    }

    #[test]
    fn crooked_drag_is_not_a_line() {
        let mut search = search(cat_dog());

        assert_eq!(
            search.select((0, 0), (1, 2), Instant::now(), &mut Progress::new(0)),
            Err(PuzzleError::NotALine)
        );
        assert_eq!(search.state(), SearchState::Active);
    }

    #[test]
    fn hint_points_at_next_unfound_word_and_costs_coins() {
        let mut progress = Progress::new(12);
        let mut search = search(cat_dog());
        search.select((0, 0), (0, 2), Instant::now(), &mut progress).unwrap();

        assert_eq!(search.hint(Instant::now(), &mut progress).unwrap(), (2, 1));
        assert_eq!(progress.coins(), 7);
        assert_eq!(search.hint(Instant::now(), &mut progress), Err(PuzzleError::NothingToReveal));
        assert_eq!(progress.coins(), 7);
    }

    #[test]
    fn hint_without_coins_changes_nothing() {
        let mut progress = Progress::new(4);
        let mut search = search(cat_dog());

        assert_eq!(
            search.hint(Instant::now(), &mut progress),
            Err(PuzzleError::InsufficientCoins {
                needed: 5,
                available: 4
            })
        );
        assert_eq!(progress.coins(), 4);
        assert_eq!(search.hint(Instant::now(), &mut Progress::new(5)).unwrap(), (0, 0));
    }

    #[test]
    fn timed_board_expires() {
        let start = Instant::now();
        let mut search = search(cat_dog());
        search.start_timer(start);

        assert!(matches!(
            search.tick(start + Duration::from_secs(29)),
            CountdownStatus::Running { .. }
        ));
        assert_eq!(search.tick(start + Duration::from_secs(30)), CountdownStatus::Expired);
        assert_eq!(search.state(), SearchState::TimedOut);
        assert_eq!(
            search.select((0, 0), (0, 2), start + Duration::from_secs(31), &mut Progress::new(0)),
            Err(PuzzleError::AlreadyEnded)
        );
    }

    #[test]
    fn late_drag_after_deadline_is_not_paid() {
        let start = Instant::now();
        let mut progress = Progress::new(0);
        let mut search = search(cat_dog());
        search.start_timer(start);
        search.select((0, 0), (0, 2), start + Duration::from_secs(10), &mut progress).unwrap();

        // no tick between the deadline and the drag
        let late = start + Duration::from_secs(45);
        assert_eq!(
            search.select((2, 1), (4, 1), late, &mut progress),
            Err(PuzzleError::AlreadyEnded)
        );
        assert_eq!(search.state(), SearchState::TimedOut);
        assert_eq!(progress.coins(), 0);
        assert!(!progress.is_completed(1));
        assert_eq!(search.hint(late, &mut progress), Err(PuzzleError::AlreadyEnded));
    }

    #[test]
    fn timed_win_pays_more_and_stops_the_clock() {
        let start = Instant::now();
        let mut progress = Progress::new(0);
        let mut search = search(cat_dog());
        search.start_timer(start);

        search.select((0, 0), (0, 2), start + Duration::from_secs(5), &mut progress).unwrap();
        search.select((2, 1), (4, 1), start + Duration::from_secs(29), &mut progress).unwrap();

        assert_eq!(progress.coins(), 10);
        assert!(search.countdown().is_cancelled());
        assert_eq!(search.tick(start + Duration::from_secs(60)), CountdownStatus::Cancelled);
        assert_eq!(search.state(), SearchState::Complete);
    }

    #[test]
    fn teardown_cancels_running_timer() {
        let start = Instant::now();
        let mut search = search(cat_dog());
        search.start_timer(start);

        search.teardown();

        assert_eq!(search.state(), SearchState::Abandoned);
        assert!(search.countdown().is_cancelled());
        search.teardown();
        assert_eq!(search.state(), SearchState::Abandoned);
    }

    #[test]
    fn board_sizes_follow_viewport() {
        let viewport = Viewport::default();

        assert_eq!(BoardSize::Small.dimensions(viewport), (6, 6));
        assert_eq!(BoardSize::Medium.dimensions(viewport), (10, 8));
        assert_eq!(BoardSize::Large.dimensions(viewport), (12, 8));
        assert_eq!(
            BoardSize::Large.dimensions(Viewport {
                width: 1200,
                height: 2000
            }),
            (14, 10)
        );
    }

    #[test]
    fn generate_places_selected_words() {
        let candidates: Vec<_> = ["CAT", "DOG", "OWL", "EMU", "YAK", "ELK", "APE", "BEE"]
            .iter()
            .map(|a| word(a))
            .collect();
        let mut rng = puzzle_rng(17);

        let search = WordSearch::for_board(
            3,
            BoardSize::Timed,
            Viewport::default(),
            &candidates,
            &EngineConfig::default(),
            &mut rng,
            Instant::now(),
        )
        .unwrap();

        assert_eq!(search.grid().size(), (10, 8));
        assert!(search.is_timed());
        assert_eq!(
            search.placements().len() + search.puzzle().dropped().len(),
            5
        );
    }

    #[test]
    fn empty_puzzle_cannot_start() {
        let puzzle = place(&[word("ELEPHANT")], (3, 3), Geometry::Linear4, 10, &mut puzzle_rng(0));

        assert_eq!(
            WordSearch::new(1, puzzle, &EngineConfig::default()).unwrap_err(),
            PuzzleError::InsufficientWords {
                required: 1,
                available: 0
            }
        );
    }
}
