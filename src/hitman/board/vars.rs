use crate::hitman::prelude::*;

use super::Board;

/// The two propositional variables tracked per cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VarKind {
    Guest,
    Guard,
}

impl Board {
    /// The number of propositional variables for this board.
    pub fn num_vars(&self) -> usize {
        let (m, n) = self.dims();
        2 * m * n
    }

    /// Encodes a cell and a kind as a DIMACS variable.
    ///
    /// Guest variables occupy `1..=m*n` in column-major order; guard
    /// variables follow in the block `m*n+1..=2*m*n`.
    pub fn cell_to_var(&self, coord: &Coord, kind: VarKind) -> i32 {
        let (m, n) = self.dims();
        debug_assert!(self.contains(coord), "coordinate {coord} is off the board");
        let var = coord.i * n + coord.j + 1;
        let var = match kind {
            VarKind::Guest => var,
            VarKind::Guard => var + m * n,
        };
        var as i32
    }

    /// Decodes a DIMACS variable back into its cell and kind.
    pub fn var_to_cell(&self, var: i32) -> (Coord, VarKind) {
        let (m, n) = self.dims();
        debug_assert!(1 <= var && var as usize <= 2 * m * n, "variable {var} out of range");
        let (kind, base) = if var as usize <= m * n {
            (VarKind::Guest, var as usize - 1)
        } else {
            (VarKind::Guard, var as usize - m * n - 1)
        };
        (Coord::new(base / n, base % n), kind)
    }

    /// All variables of one kind, column-major.
    pub fn vars(&self, kind: VarKind) -> Vec<i32> {
        self.coords().map(|c| self.cell_to_var(&c, kind)).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::hitman::prelude::*;

    use super::{Board, VarKind};

    #[test]
    fn encoding_matches_the_worked_example() {
        // On a 2x2 board guests take 1..=4 and guards 5..=8.
        let board = Board::new(2, 2).unwrap();
        assert_eq!(board.cell_to_var(&Coord::new(0, 0), VarKind::Guest), 1);
        assert_eq!(board.cell_to_var(&Coord::new(0, 1), VarKind::Guest), 2);
        assert_eq!(board.cell_to_var(&Coord::new(1, 0), VarKind::Guest), 3);
        assert_eq!(board.cell_to_var(&Coord::new(0, 0), VarKind::Guard), 5);
        assert_eq!(board.cell_to_var(&Coord::new(1, 1), VarKind::Guard), 8);
    }

    #[test]
    fn encoding_and_decoding_are_mutual_inverses() {
        let board = Board::new(3, 4).unwrap();
        for var in 1..=(board.num_vars() as i32) {
            let (coord, kind) = board.var_to_cell(var);
            assert_eq!(board.cell_to_var(&coord, kind), var);
        }
    }
}
