use crate::hitman::prelude::*;
use crate::referee::Status;
use crate::sat::SatSolver;

use super::SatMode;

/// Two collinear candidate cells of which exactly one holds a guard with
/// the given facing; which one is settled by later evidence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PendingPair {
    pub facing: Direction,
    pub cells: [Coord; 2],
}

impl PendingPair {
    /// The partner of `coord` in the pair, if `coord` is a member.
    pub fn other(&self, coord: &Coord) -> Option<Coord> {
        match self.cells {
            [a, b] if a == *coord => Some(b),
            [a, b] if b == *coord => Some(a),
            _ => None,
        }
    }
}

/// Everything the agent believes about the board: the cell model, the CNF
/// clause base, the per-cell sighting counts, and the person counters.
///
/// The clause base is append-only during observation; hypothetical solver
/// queries run on a scratch copy so nothing speculative ever lands in it.
pub struct Intel {
    pub board: Board,
    solver: Box<dyn SatSolver>,
    pub(crate) sat_mode: SatMode,
    clauses: Cnf,
    num_vars: usize,
    /// Guards that saw the agent on each visited cell; `None` elsewhere.
    sightings: Vec<Vec<Option<u32>>>,
    pub(crate) old_penalty: u32,
    pub(crate) pending: Vec<PendingPair>,
    pub(crate) visited_positions: HashSet<Coord>,
    pub(crate) visited_states: HashSet<(Coord, Direction)>,
    pub(crate) unknown_guests_left: usize,
    pub(crate) unknown_guards_left: usize,
}

impl Intel {
    /// Builds an empty knowledge base for the announced board, seeded with
    /// the clauses excluding a guest and a guard from sharing a cell.
    pub fn new(status: &Status, solver: Box<dyn SatSolver>, sat_mode: SatMode) -> Result<Intel> {
        let board = Board::new(status.m, status.n)?;
        let num_vars = board.num_vars();
        let guest_vars = board.vars(VarKind::Guest);
        let guard_vars = board.vars(VarKind::Guard);
        let clauses = cnf::pairwise_exclude(&guest_vars, &guard_vars);

        Ok(Intel {
            sightings: vec![vec![None; status.n]; status.m],
            board,
            solver,
            sat_mode,
            clauses,
            num_vars,
            old_penalty: 0,
            pending: vec![],
            visited_positions: HashSet::new(),
            visited_states: HashSet::new(),
            unknown_guests_left: status.civil_count,
            unknown_guards_left: status.guard_count,
        })
    }

    /// Appends a clause to the base.
    pub fn add_clause(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Appends a batch of clauses to the base.
    pub fn add_clauses(&mut self, clauses: Cnf) {
        self.clauses.extend(clauses);
    }

    /// Whether the clause base is satisfiable.
    pub fn satisfiable(&self) -> Result<bool> {
        self.solver.satisfiable(&self.clauses, self.num_vars)
    }

    /// Whether the clause base extended with `extra` is satisfiable. The
    /// base itself is never touched.
    pub fn satisfiable_with(&self, extra: &[Clause]) -> Result<bool> {
        let mut scratch = self.clauses.clone();
        scratch.extend_from_slice(extra);
        self.solver.satisfiable(&scratch, self.num_vars)
    }

    /// How many guards saw the agent on a visited cell; `None` if the cell
    /// was never visited.
    pub fn guards_seen_at(&self, coord: &Coord) -> Option<u32> {
        self.sightings[coord.i][coord.j]
    }

    pub(crate) fn record_sighting(&mut self, coord: &Coord, seen: u32) {
        self.sightings[coord.i][coord.j] = Some(seen);
    }

    /// Commits a deduced guard to the board and maintains the counter.
    pub(crate) fn commit_guard(&mut self, coord: &Coord, facing: Direction) -> Result<()> {
        self.board.set_content(coord, Content::Guard(facing))?;
        self.note_guard_identified();
        Ok(())
    }

    /// Bookkeeping for a positively identified guard: once the last one is
    /// found, every still-unknown cell is provably not a guard.
    pub(crate) fn note_guard_identified(&mut self) {
        self.unknown_guards_left = self.unknown_guards_left.saturating_sub(1);
        if self.unknown_guards_left == 0 {
            for coord in self.board.coords() {
                if !self.board.cell(&coord).is_known() {
                    self.board.prove_not_guard(&coord);
                }
            }
        }
    }

    pub(crate) fn note_guest_identified(&mut self) {
        self.unknown_guests_left = self.unknown_guests_left.saturating_sub(1);
    }
}
