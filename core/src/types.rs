use serde::{Deserialize, Serialize};

/// Single coordinate axis used for grid rows, columns, and positions.
pub type Coord = u8;

/// Count type used for cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Direction a word runs in, always reading top to bottom or left to right.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Horizontal,
    Vertical,
    DiagDownRight,
    DiagDownLeft,
}

impl Direction {
    pub const LINEAR: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagDownRight,
        Direction::DiagDownLeft,
    ];

    /// Crossword directions, across and down.
    pub const ORTHOGONAL: [Direction; 2] = [Direction::Horizontal, Direction::Vertical];

    /// `(row, col)` step between consecutive letters.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Horizontal => (0, 1),
            Self::Vertical => (1, 0),
            Self::DiagDownRight => (1, 1),
            Self::DiagDownLeft => (1, -1),
        }
    }

    /// Step to the cell beside a letter, across the run.
    pub const fn perpendicular(self) -> (isize, isize) {
        match self {
            Self::Horizontal => (1, 0),
            Self::Vertical => (0, 1),
            Self::DiagDownRight => (1, -1),
            Self::DiagDownLeft => (1, 1),
        }
    }

    pub const fn is_orthogonal(self) -> bool {
        matches!(self, Self::Horizontal | Self::Vertical)
    }

    pub(crate) const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// Moves `coords` by `steps` multiples of `delta`, returning a value only when it stays inside `bounds`.
pub fn offset(coords: Coord2, delta: (isize, isize), steps: isize, bounds: Coord2) -> Option<Coord2> {
    let row = isize::from(coords.0).checked_add(delta.0.checked_mul(steps)?)?;
    let col = isize::from(coords.1).checked_add(delta.1.checked_mul(steps)?)?;

    if row < 0 || col < 0 || row >= isize::from(bounds.0) || col >= isize::from(bounds.1) {
        return None;
    }

    Some((row.try_into().ok()?, col.try_into().ok()?))
}

/// Straight run of cells between two grid positions, inclusive on both ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Line {
    start: Coord2,
    delta: (isize, isize),
    len: usize,
}

impl Line {
    /// Horizontal, vertical and 45 degree runs only; anything else is `None`.
    pub fn between(start: Coord2, end: Coord2) -> Option<Self> {
        let d_row = isize::from(end.0) - isize::from(start.0);
        let d_col = isize::from(end.1) - isize::from(start.1);

        if d_row != 0 && d_col != 0 && d_row.abs() != d_col.abs() {
            return None;
        }

        Some(Self {
            start,
            delta: (d_row.signum(), d_col.signum()),
            len: d_row.abs().max(d_col.abs()).unsigned_abs() + 1,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn cells(&self) -> impl Iterator<Item = Coord2> + use<> {
        let Self { start, delta, len } = *self;
        (0..len).map(move |step| {
            let step = step as isize;
            let row = isize::from(start.0) + delta.0 * step;
            let col = isize::from(start.1) + delta.1 * step;
            (row as Coord, col as Coord)
        })
    }
}
