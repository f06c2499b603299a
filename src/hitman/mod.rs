/*
 *  The agent's model of the Hitman game: board geometry, cell knowledge,
 *  and the CNF vocabulary shared with the SAT solver.
 */

pub(crate) mod board;
pub mod cell;
pub mod cnf;
pub mod consts;
pub mod coords;
pub mod notation;

pub mod prelude {
    pub(crate) use crate::utils::prelude::*;

    pub use super::{
        board::{Board, VarKind},
        cell::{Cell, Content},
        cnf::{self, Clause, Cnf},
        consts::Direction,
        coords::{Coord, OffsetCoord},
        notation::WorldString,
    };
}
