use ndarray::Array2;

use super::*;

/// Places `words` in order onto an empty `size` grid.
///
/// Each word gets up to `retries` random attempts; one attempt draws a row, then a column, then a direction
/// from `geometry`. A word whose attempts all fail is dropped and reported in [`Puzzle::dropped`]. Once every
/// word has been tried, leftover cells are filled with random letters (word search) or blocked (crossword),
/// again in row-major order.
pub fn place(
    words: &[Word],
    size: Coord2,
    geometry: Geometry,
    retries: usize,
    rng: &mut impl RandomSource,
) -> Puzzle {
    let mut scratch = Scratch::new(size);
    let mut placements: Vec<Placement> = Vec::with_capacity(words.len());
    let mut dropped = Vec::new();
    let directions = geometry.directions();

    for word in words {
        let letters: Vec<char> = word.letters().collect();

        let spot = if size.0 == 0 || size.1 == 0 {
            None
        } else {
            (0..retries).find_map(|_| {
                let origin = (
                    rng.next_index(size.0.into()) as Coord,
                    rng.next_index(size.1.into()) as Coord,
                );
                let direction = directions[rng.next_index(directions.len())];
                scratch
                    .fits(&letters, origin, direction, geometry)
                    .then_some((origin, direction))
            })
        };

        match spot {
            Some((origin, direction)) => {
                scratch.write(&letters, origin, direction);
                let order_index = (placements.len() + 1).try_into().unwrap_or(u16::MAX);
                placements.push(Placement::new(word.clone(), origin, direction, order_index));
            }
            None => {
                log::warn!(
                    "Could not place {} after {} attempts, dropping it",
                    word.answer(),
                    retries
                );
                dropped.push(word.clone());
            }
        }
    }

    let grid = scratch.finish(geometry, &placements, rng);
    Puzzle::new_unchecked(grid, placements, dropped)
}

/// Working state while placing: letters so far plus which directions run through each cell.
struct Scratch {
    letters: Array2<Option<char>>,
    runs: Array2<u8>,
}

impl Scratch {
    fn new(size: Coord2) -> Self {
        Self {
            letters: Array2::default(size.to_nd_index()),
            runs: Array2::default(size.to_nd_index()),
        }
    }

    fn size(&self) -> Coord2 {
        let dim = self.letters.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    fn letter(&self, coords: Coord2) -> Option<char> {
        self.letters[coords.to_nd_index()]
    }

    /// Off-grid counts as free.
    fn is_free(&self, coords: Option<Coord2>) -> bool {
        coords.is_none_or(|coords| self.letter(coords).is_none())
    }

    fn fits(&self, letters: &[char], origin: Coord2, direction: Direction, geometry: Geometry) -> bool {
        let bounds = self.size();
        let delta = direction.delta();
        let len = letters.len() as isize;

        if len == 0 || offset(origin, delta, len - 1, bounds).is_none() {
            return false;
        }

        // nothing may touch either end, or two words would read as one
        if !self.is_free(offset(origin, delta, -1, bounds))
            || !self.is_free(offset(origin, delta, len, bounds))
        {
            return false;
        }

        let crossing = geometry.allows_crossing();
        let side = direction.perpendicular();

        for (step, &letter) in letters.iter().enumerate() {
            let Some(coords) = offset(origin, delta, step as isize, bounds) else {
                return false;
            };

            match self.letter(coords) {
                None => {
                    if crossing
                        && !(self.is_free(offset(coords, side, 1, bounds))
                            && self.is_free(offset(coords, side, -1, bounds)))
                    {
                        return false;
                    }
                }
                Some(existing) => {
                    let same_direction = self.runs[coords.to_nd_index()] & direction.mask() != 0;
                    if !crossing || existing != letter || same_direction {
                        return false;
                    }
                }
            }
        }

        true
    }

    fn write(&mut self, letters: &[char], origin: Coord2, direction: Direction) {
        let bounds = self.size();
        for (step, &letter) in letters.iter().enumerate() {
            if let Some(coords) = offset(origin, direction.delta(), step as isize, bounds) {
                self.letters[coords.to_nd_index()] = Some(letter);
                self.runs[coords.to_nd_index()] |= direction.mask();
            }
        }
    }

    fn finish(self, geometry: Geometry, placements: &[Placement], rng: &mut impl RandomSource) -> Grid {
        let mut cells = self.letters.map(|&letter| match (letter, geometry) {
            (Some(letter), _) => Cell::Letter(letter),
            (None, Geometry::Linear4) => Cell::Empty,
            (None, Geometry::CrossingOrtho) => Cell::Blocked,
        });

        match geometry {
            Geometry::Linear4 => {
                for cell in cells.iter_mut() {
                    if cell.is_empty() {
                        *cell = Cell::Letter(rng.letter());
                    }
                }
            }
            Geometry::CrossingOrtho => {
                // placements are in order, so a shared start keeps the lower number
                for placement in placements {
                    let start = &mut cells[placement.origin().to_nd_index()];
                    if let Cell::Letter(letter) = *start {
                        *start = Cell::Numbered {
                            number: placement.order_index(),
                            letter,
                        };
                    }
                }
            }
        }

        Grid::from_cells(cells)
    }
}
