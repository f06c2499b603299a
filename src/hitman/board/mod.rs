mod geometry;
mod pretty;
mod vars;

pub use vars::VarKind;

use crate::hitman::prelude::*;

/// The agent's model of the game board: an m-by-n grid of [`Cell`]s,
/// indexed `[i][j]` with the origin at the bottom-left corner, plus the
/// agent's own pose for rendering.
///
/// The grid starts fully unknown and is only ever written through the
/// knowledge updater (phase 1) or through [`Board::erase`] (phase 2
/// removals), so a known cell is trustworthy for the rest of the game.
#[derive(Clone, Debug)]
pub struct Board {
    m: usize,
    n: usize,
    grid: Vec<Vec<Cell>>,
    hitman: Option<(Coord, Direction)>,
    suit_on: bool,
}

impl Board {
    /// Returns a new, fully unknown board.
    pub fn new(m: usize, n: usize) -> Result<Board> {
        if m == 0 || n == 0 {
            return Err(anyhow!(HitmanError::InvalidArgument(format!(
                "board dimensions must be positive, received {m}x{n}"
            ))));
        }
        Ok(Board {
            m,
            n,
            grid: vec![vec![Cell::default(); n]; m],
            hitman: None,
            suit_on: false,
        })
    }

    /// The board dimensions as (columns, rows).
    pub fn dims(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    /// Whether the coordinate lies on the board.
    pub fn contains(&self, coord: &Coord) -> bool {
        coord.i < self.m && coord.j < self.n
    }

    /// Coerces an offset back onto the board, if it lands inside.
    pub fn checked(&self, offset: OffsetCoord) -> Option<Coord> {
        offset.in_bounds_signed(self.m, self.n).then(|| offset.coerce())
    }

    /// The cell one step from `coord` in `direction`, scaled by `k`.
    pub fn step(&self, coord: &Coord, direction: Direction, k: isize) -> Option<Coord> {
        self.checked(coord + direction.offset().times(k))
    }

    /// Gets the cell at a coordinate.
    pub fn get(&self, coord: &Coord) -> Result<&Cell> {
        if self.contains(coord) {
            Ok(&self.grid[coord.i][coord.j])
        } else {
            Err(anyhow!(HitmanError::InvalidArgument(format!(
                "coordinate {coord} is off the board"
            ))))
        }
    }

    /// Direct cell access; callers guarantee the coordinate is on the board.
    pub fn cell(&self, coord: &Coord) -> &Cell {
        &self.grid[coord.i][coord.j]
    }

    /// The content at a coordinate; callers guarantee it is on the board.
    pub fn content(&self, coord: &Coord) -> Content {
        self.cell(coord).content()
    }

    /// Records the content of a cell.
    pub fn set_content(&mut self, coord: &Coord, content: Content) -> Result<()> {
        if !self.contains(coord) {
            return Err(anyhow!(HitmanError::InvalidArgument(format!(
                "coordinate {coord} is off the board"
            ))));
        }
        self.grid[coord.i][coord.j].set_content(content)
    }

    /// Empties a cell after a phase-2 removal.
    pub fn erase(&mut self, coord: &Coord) -> Result<()> {
        if !self.contains(coord) {
            return Err(anyhow!(HitmanError::InvalidArgument(format!(
                "coordinate {coord} is off the board"
            ))));
        }
        self.grid[coord.i][coord.j].erase();
        Ok(())
    }

    /// Raises the not-a-guard proof on a cell.
    pub fn prove_not_guard(&mut self, coord: &Coord) {
        self.grid[coord.i][coord.j].prove_not_guard();
    }

    /// Iterates over every coordinate of the board, column-major.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let (m, n) = (self.m, self.n);
        (0..m).flat_map(move |i| (0..n).map(move |j| Coord::new(i, j)))
    }

    /// Whether every cell's content has been determined.
    pub fn all_known(&self) -> bool {
        self.coords().all(|c| self.cell(&c).is_known())
    }

    /// Finds the cell holding the given content, if any.
    pub fn locate(&self, needle: Content) -> Option<Coord> {
        self.coords().find(|c| self.content(c) == needle)
    }

    /// Converts the board into the submission mapping expected by the
    /// referee. Fails while any cell is still unknown.
    pub fn submission(&self) -> Result<HashMap<Coord, Content>> {
        let mut mapping = HashMap::new();
        for coord in self.coords() {
            let content = self.content(&coord);
            if !content.is_known() {
                return Err(anyhow!(HitmanError::InvalidArgument(format!(
                    "content of cell {coord} is not known"
                ))));
            }
            mapping.insert(coord, content);
        }
        Ok(mapping)
    }

    /// Updates the agent's pose for rendering.
    pub fn set_hitman(&mut self, coord: Coord, facing: Direction) {
        self.hitman = Some((coord, facing));
    }

    /// The agent's pose, if placed.
    pub fn hitman(&self) -> Option<(Coord, Direction)> {
        self.hitman
    }

    /// Marks the disguise as worn, for rendering.
    pub fn put_suit(&mut self) {
        self.suit_on = true;
    }

    pub(super) fn suit_on(&self) -> bool {
        self.suit_on
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::hitman::prelude::*;

    #[test]
    fn zero_sized_boards_are_rejected() {
        assert!(Board::new(0, 3).is_err());
        assert!(Board::new(3, 0).is_err());
    }

    #[test]
    fn submission_requires_a_complete_board() {
        let mut board = Board::new(2, 1).unwrap();
        board.set_content(&Coord::new(0, 0), Content::Empty).unwrap();
        assert!(board.submission().is_err());
        board.set_content(&Coord::new(1, 0), Content::Wall).unwrap();
        let mapping = board.submission().unwrap();
        assert_eq!(mapping[&Coord::new(1, 0)], Content::Wall);
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn locate_finds_objects() {
        let mut board = Board::new(3, 3).unwrap();
        board.set_content(&Coord::new(2, 1), Content::Rope).unwrap();
        assert_eq!(board.locate(Content::Rope), Some(Coord::new(2, 1)));
        assert_eq!(board.locate(Content::Suit), None);
    }
}
