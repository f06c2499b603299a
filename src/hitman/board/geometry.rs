use std::collections::VecDeque;

use crate::hitman::prelude::*;

use super::Board;

impl Board {
    /// The up-to-four orthogonal neighbours of a cell.
    pub fn neighbours(&self, coord: &Coord) -> Vec<Coord> {
        Direction::all()
            .iter()
            .filter_map(|d| self.step(coord, *d, 1))
            .collect()
    }

    /// For each facing, the cells from which a guard with that facing could
    /// see `coord`. A guard looking east sits to the west of its victim, so
    /// the candidates for facing `d` are walked opposite to `d`.
    ///
    /// Per direction the list holds between zero and two cells:
    /// - a known guard at distance 1 is a candidate and shadows distance 2;
    /// - an unknown cell at distance 1 is a candidate, and does not settle
    ///   whether distance 2 could see past it;
    /// - an empty cell at distance 1 lets distance 2 through;
    /// - anything else at distance 1 (wall, object, guest) blocks the line.
    pub fn guard_candidates(&self, coord: &Coord) -> HashMap<Direction, Vec<Coord>> {
        let mut candidates = HashMap::new();
        for facing in Direction::all() {
            let mut cells = vec![];
            let toward = facing.opposite();
            if let Some(first) = self.step(coord, toward, 1) {
                match self.content(&first) {
                    Content::Guard(_) => cells.push(first),
                    Content::Unknown | Content::Empty => {
                        if self.content(&first) == Content::Unknown {
                            cells.push(first);
                        }
                        if let Some(second) = self.step(coord, toward, 2) {
                            if matches!(self.content(&second), Content::Unknown | Content::Guard(_)) {
                                cells.push(second);
                            }
                        }
                    }
                    _ => {}
                }
            }
            candidates.insert(facing, cells);
        }
        candidates
    }

    /// Every on-board cell of the 5x5 listening zone centred on `coord`,
    /// the centre included.
    pub fn audible_cells(&self, coord: &Coord) -> Vec<Coord> {
        let mut cells = vec![];
        for di in -2..=2 {
            for dj in -2..=2 {
                if let Some(c) = self.checked(coord + OffsetCoord::new(di, dj)) {
                    cells.push(c);
                }
            }
        }
        cells
    }

    /// The up-to-three cells visible from `coord` in `direction`.
    ///
    /// The line runs through empty and unknown cells. The first other cell
    /// terminates it: a wall or guard is excluded (nobody stands there), any
    /// other object or a guest is included (one can stand on it and it can
    /// be seen).
    pub fn sight_line(&self, coord: &Coord, direction: Direction) -> Vec<Coord> {
        let mut cells = vec![];
        for k in 1..=3 {
            let Some(c) = self.step(coord, direction, k) else {
                break;
            };
            match self.content(&c) {
                Content::Empty | Content::Unknown => cells.push(c),
                content if content.is_forbidden() => break,
                _ => {
                    cells.push(c);
                    break;
                }
            }
        }
        cells
    }

    /// Whether one of the two L-shaped paths between `a` and `b`
    /// (horizontal-then-vertical, or the reverse) avoids every forbidden
    /// cell. Both endpoints are part of the scan.
    pub fn direct_path(&self, a: &Coord, b: &Coord) -> bool {
        let clear_row = |j: usize| -> bool {
            (a.i.min(b.i)..=a.i.max(b.i)).all(|i| !self.content(&Coord::new(i, j)).is_forbidden())
        };
        let clear_col = |i: usize| -> bool {
            (a.j.min(b.j)..=a.j.max(b.j)).all(|j| !self.content(&Coord::new(i, j)).is_forbidden())
        };
        (clear_row(a.j) && clear_col(b.i)) || (clear_col(a.i) && clear_row(b.j))
    }

    /// The length of the shortest path from `a` to `b` that avoids every
    /// forbidden cell. Unknown cells are optimistically traversable.
    pub fn min_distance(&self, a: &Coord, b: &Coord) -> Result<usize> {
        if !self.contains(a) || !self.contains(b) {
            return Err(anyhow!(HitmanError::InvalidArgument(format!(
                "coordinates {a} and {b} must be on the board"
            ))));
        }
        if a == b {
            return Ok(0);
        }

        let mut seen = HashSet::from([*a]);
        let mut frontier = VecDeque::from([(*a, 0usize)]);
        while let Some((current, distance)) = frontier.pop_front() {
            for next in self.neighbours(&current) {
                if self.content(&next).is_forbidden() || !seen.insert(next) {
                    continue;
                }
                if next == *b {
                    return Ok(distance + 1);
                }
                frontier.push_back((next, distance + 1));
            }
        }
        Err(anyhow!(HitmanError::Unreachable { from: *a, to: *b }))
    }
}
