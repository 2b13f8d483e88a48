use alloc::collections::BTreeSet;

use super::*;

/// Picks the target words for a word search on a `size` board.
///
/// Candidates longer than the longest side are skipped, duplicates are removed and the rest are shuffled.
/// A board asks for `min(cap, rows / 2)` words (at least one); fewer valid candidates than that is
/// `InsufficientWords`.
pub fn select_search_words(
    candidates: &[Word],
    size: Coord2,
    cap: usize,
    rng: &mut impl RandomSource,
) -> Result<Vec<Word>> {
    let longest = usize::from(size.0.max(size.1));
    let required = cap.min(usize::from(size.0) / 2).max(1);

    let mut pool: Vec<&Word> = candidates.iter().filter(|word| word.len() <= longest).collect();
    rng.shuffle(&mut pool);

    let mut seen = BTreeSet::new();
    let selected: Vec<Word> = pool
        .into_iter()
        .filter(|word| seen.insert(word.answer()))
        .take(required)
        .cloned()
        .collect();

    if selected.len() < required {
        return Err(PuzzleError::InsufficientWords {
            required,
            available: selected.len(),
        });
    }

    Ok(selected)
}

/// Picks crossword entries in input order: each needs a clue and must fit a `side x side` grid.
pub fn select_crossword_words(candidates: &[Word], side: Coord, cap: usize) -> Vec<Word> {
    let mut seen = BTreeSet::new();
    candidates
        .iter()
        .filter(|word| word.clue().is_some() && word.len() <= usize::from(side))
        .filter(|word| seen.insert(word.answer()))
        .take(cap)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(answers: &[&str]) -> Vec<Word> {
        answers.iter().map(|a| Word::new(a, None).unwrap()).collect()
    }

    #[test]
    fn search_selection_takes_half_the_rows() {
        let candidates = words(&["CAT", "DOG", "OWL", "EMU", "YAK", "ELK", "APE"]);
        let mut rng = puzzle_rng(5);

        let selected = select_search_words(&candidates, (8, 8), 10, &mut rng).unwrap();

        assert_eq!(selected.len(), 4);
        assert!(selected.iter().all(|word| candidates.contains(word)));
    }

    #[test]
    fn search_selection_respects_cap() {
        let candidates = words(&["CAT", "DOG", "OWL", "EMU", "YAK", "ELK", "APE"]);
        let mut rng = puzzle_rng(5);

        let selected = select_search_words(&candidates, (14, 10), 3, &mut rng).unwrap();

        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn search_selection_skips_long_and_duplicate_words() {
        let candidates = words(&["CAT", "cat", "CROCODILE", "DOG"]);
        let mut rng = puzzle_rng(1);

        let err = select_search_words(&candidates, (6, 6), 10, &mut rng).unwrap_err();

        assert_eq!(
            err,
            PuzzleError::InsufficientWords {
                required: 3,
                available: 2
            }
        );
    }

    #[test]
    fn crossword_selection_needs_clues() {
        let candidates = vec![
            Word::new("SUN", Some("star")).unwrap(),
            Word::new("MOON", None).unwrap(),
            Word::new("EXTRAORDINARILY", Some("very")).unwrap(),
            Word::new("SUN", Some("again")).unwrap(),
            Word::new("MARS", Some("planet")).unwrap(),
        ];

        let selected = select_crossword_words(&candidates, 10, 10);

        let answers: Vec<_> = selected.iter().map(Word::answer).collect();
        assert_eq!(answers, vec!["SUN", "MARS"]);
        assert_eq!(selected[0].clue(), Some("star"));
    }
}
