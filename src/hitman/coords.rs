use crate::utils::prelude::*;

/// Simple board coordinate; `i` is the column, `j` the row, with the
/// origin at the bottom-left corner. Bounds live on the board, which is
/// sized at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub i: usize,
    pub j: usize,
}

impl Coord {
    /// Constructs a new coord.
    pub fn new(i: usize, j: usize) -> Coord {
        Coord { i, j }
    }

    /// The taxicab distance between two coords.
    pub fn manhattan(&self, other: &Coord) -> usize {
        self.i.abs_diff(other.i) + self.j.abs_diff(other.j)
    }

    /// Whether the two coords share a row or a column.
    pub fn aligned(&self, other: &Coord) -> bool {
        self.i == other.i || self.j == other.j
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

/// Signed offset pair used to step off a coordinate without underflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OffsetCoord {
    pub i: isize,
    pub j: isize,
}

impl OffsetCoord {
    /// Constructs a new offset coord.
    pub fn new(i: isize, j: isize) -> OffsetCoord {
        OffsetCoord { i, j }
    }

    /// Coerces the offset back into a coordinate unchecked.
    pub fn coerce(&self) -> Coord {
        Coord {
            i: self.i as usize,
            j: self.j as usize,
        }
    }

    /// Whether the offset lies inside an m-by-n board.
    pub fn in_bounds_signed(&self, m: usize, n: usize) -> bool {
        0 <= self.i && self.i < m as isize && 0 <= self.j && self.j < n as isize
    }

    /// Scales the offset by an integer factor.
    pub fn times(&self, k: isize) -> OffsetCoord {
        OffsetCoord::new(self.i * k, self.j * k)
    }
}

// C -> OC

impl From<Coord> for OffsetCoord {
    fn from(value: Coord) -> Self {
        OffsetCoord {
            i: value.i as isize,
            j: value.j as isize,
        }
    }
}

impl From<&Coord> for OffsetCoord {
    fn from(value: &Coord) -> Self {
        OffsetCoord {
            i: value.i as isize,
            j: value.j as isize,
        }
    }
}

// OC + OC

impl Add<OffsetCoord> for OffsetCoord {
    type Output = OffsetCoord;
    fn add(self, rhs: OffsetCoord) -> Self::Output {
        OffsetCoord {
            i: self.i + rhs.i,
            j: self.j + rhs.j,
        }
    }
}

// C + OC

impl Add<OffsetCoord> for &Coord {
    type Output = OffsetCoord;
    fn add(self, rhs: OffsetCoord) -> Self::Output {
        OffsetCoord::from(self) + rhs
    }
}

impl Add<OffsetCoord> for Coord {
    type Output = OffsetCoord;
    fn add(self, rhs: OffsetCoord) -> Self::Output {
        &self + rhs
    }
}
