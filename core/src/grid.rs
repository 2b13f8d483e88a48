use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size `rows x cols` board. Dimensions never change after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    /// Builds a grid from text rows: `.` is empty, `#` is blocked, letters are letters.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let size: Coord2 = (
            height.try_into().map_err(|_| PuzzleError::ShapeMismatch)?,
            width.try_into().map_err(|_| PuzzleError::ShapeMismatch)?,
        );

        let mut grid = Self::new(size);
        for (row, text) in rows.iter().enumerate() {
            if text.chars().count() != width {
                return Err(PuzzleError::ShapeMismatch);
            }
            for (col, glyph) in text.chars().enumerate() {
                let cell = match glyph {
                    '.' => Cell::Empty,
                    '#' => Cell::Blocked,
                    letter if letter.is_ascii_alphabetic() => Cell::Letter(letter.to_ascii_uppercase()),
                    _ => return Err(PuzzleError::InvalidLetter),
                };
                grid.cells[[row, col]] = cell;
            }
        }

        Ok(grid)
    }

    pub(crate) fn from_cells(cells: Array2<Cell>) -> Self {
        Self { cells }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(PuzzleError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self[coords]
    }

    pub fn letter_at(&self, coords: Coord2) -> Option<char> {
        self.cells
            .get(coords.to_nd_index())
            .and_then(|cell| cell.letter())
    }

    /// Reads the glyphs of `cells` in order.
    pub fn read(&self, cells: impl IntoIterator<Item = Coord2>) -> String {
        cells.into_iter().map(|coords| self[coords].glyph()).collect()
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Letters the player has typed into a crossword, one optional letter per cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnswerGrid {
    entries: Array2<Option<char>>,
}

impl AnswerGrid {
    pub fn new(size: Coord2) -> Self {
        Self {
            entries: Array2::default(size.to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.entries.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    /// Out-of-range coordinates read as blank.
    pub fn entry(&self, coords: Coord2) -> Option<char> {
        self.entries.get(coords.to_nd_index()).copied().flatten()
    }

    pub fn fill(&mut self, coords: Coord2, letter: char) -> Result<()> {
        if !letter.is_ascii_alphabetic() {
            return Err(PuzzleError::InvalidLetter);
        }
        let slot = self
            .entries
            .get_mut(coords.to_nd_index())
            .ok_or(PuzzleError::InvalidCoords)?;
        *slot = Some(letter.to_ascii_uppercase());
        Ok(())
    }

    pub fn clear(&mut self, coords: Coord2) -> Result<()> {
        let slot = self
            .entries
            .get_mut(coords.to_nd_index())
            .ok_or(PuzzleError::InvalidCoords)?;
        *slot = None;
        Ok(())
    }

    pub fn filled_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }
}
