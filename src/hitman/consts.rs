use crate::utils::prelude::*;

use super::coords::OffsetCoord;

/// A facing on the board. Also doubles as a movement direction:
/// east is +i, north is +j.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// The four directions in clockwise order, starting north.
    pub fn all() -> [Direction; 4] {
        [Direction::North, Direction::East, Direction::South, Direction::West]
    }

    /// The facing after a quarter turn clockwise.
    pub fn clockwise(&self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// The facing after a quarter turn counter-clockwise.
    pub fn counter_clockwise(&self) -> Direction {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    /// The reverse facing.
    pub fn opposite(&self) -> Direction {
        self.clockwise().clockwise()
    }

    /// The unit offset of one step in this direction.
    pub fn offset(&self) -> OffsetCoord {
        match self {
            Direction::North => OffsetCoord::new(0, 1),
            Direction::East => OffsetCoord::new(1, 0),
            Direction::South => OffsetCoord::new(0, -1),
            Direction::West => OffsetCoord::new(-1, 0),
        }
    }

    /// Arrow glyph used by the board renderer.
    pub fn glyph(&self) -> char {
        match self {
            Direction::North => '↑',
            Direction::East => '→',
            Direction::South => '↓',
            Direction::West => '←',
        }
    }

    /// Single-letter notation.
    pub fn notate(&self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "N" | "n" => Ok(Direction::North),
            "E" | "e" => Ok(Direction::East),
            "S" | "s" => Ok(Direction::South),
            "W" | "w" => Ok(Direction::West),
            _ => Err(anyhow!("invalid notation {s} for Direction")),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notate())
    }
}

#[cfg(test)]
mod tests {
    use super::Direction;

    #[test]
    fn four_quarter_turns_are_identity() {
        for d in Direction::all() {
            assert_eq!(d.clockwise().clockwise().clockwise().clockwise(), d);
            assert_eq!(d.clockwise().counter_clockwise(), d);
            assert_eq!(d.opposite().opposite(), d);
        }
    }
}
