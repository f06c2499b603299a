use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::hitman::prelude::*;

use super::intel::Intel;
use super::SatMode;

impl Intel {
    /// Ranks how dangerous it is to stand on a cell, as `4*min + max` over
    /// the guaranteed and possible sighting guards per direction. The
    /// encoding sorts by guaranteed sightings first, possible ones second.
    ///
    /// With the solver enabled, an unknown candidate is first attacked:
    /// if asserting "this cell is a guard" is unsatisfiable the cell is
    /// proven safe (and the refutation is learned), otherwise it counts
    /// toward `max`. The hypothesis itself runs on a scratch copy and
    /// never contaminates the clause base.
    pub fn risk(&mut self, coord: &Coord, use_sat: bool) -> Result<u32> {
        let use_sat = match self.sat_mode {
            SatMode::Auto => use_sat,
            SatMode::Sat => true,
            SatMode::NoSat => false,
        };

        // A guest's square hides the agent entirely.
        if matches!(self.board.content(coord), Content::Guest(_)) {
            return Ok(0);
        }
        // A visited square's sighting count is exact: min = max = m.
        if let Some(m) = self.guards_seen_at(coord) {
            return Ok(4 * m + m);
        }

        let candidates = self.board.guard_candidates(coord);
        let mut guaranteed = 0;
        let mut possible = 0;

        for facing in Direction::all() {
            let (mut lo, mut hi) = (0, 0);
            for cell in &candidates[&facing] {
                if self.board.content(cell) == Content::Guard(facing) {
                    (lo, hi) = (1, 1);
                    break;
                }
                if self.board.cell(cell).proven_not_guard() || self.board.cell(cell).is_known() {
                    continue;
                }
                if !use_sat {
                    hi = 1;
                    continue;
                }
                let guard_var = self.board.cell_to_var(cell, VarKind::Guard);
                if self.satisfiable_with(&[vec![guard_var]])? {
                    hi = 1;
                } else {
                    self.board.prove_not_guard(cell);
                    self.add_clause(vec![-guard_var]);
                }
            }
            guaranteed += lo;
            possible += hi;
        }

        // An unknown cell could itself be a guest, voiding every guarantee.
        if !self.board.cell(coord).is_known() && self.unknown_guests_left > 0 {
            guaranteed = 0;
        }

        Ok(4 * guaranteed + possible)
    }

    /// The cheapest-penalty cost of reaching `target` from every cell:
    /// Dijkstra where stepping onto `v` costs `1 + risk(v)`, seeded with
    /// the target's own risk. Solver-backed risk is reserved for the
    /// `focus` cells (typically the agent's neighbours), and the relaxation
    /// stops early once all of them are settled.
    pub fn minimum_penalty_map(
        &mut self,
        target: &Coord,
        focus: &HashSet<Coord>,
    ) -> Result<Vec<Vec<u64>>> {
        let (m, n) = self.board.dims();
        let mut penalties = vec![vec![u64::MAX; n]; m];
        let mut settled: HashSet<Coord> = HashSet::new();
        let mut heap: BinaryHeap<Reverse<(u64, usize, usize)>> = BinaryHeap::new();

        penalties[target.i][target.j] = self.risk(target, focus.contains(target))? as u64;
        settled.insert(*target);

        let seed = penalties[target.i][target.j];
        for neighbour in self.board.neighbours(target) {
            if self.board.content(&neighbour).is_forbidden() {
                continue;
            }
            let cost = seed + 1 + self.risk(&neighbour, focus.contains(&neighbour))? as u64;
            heap.push(Reverse((cost, neighbour.i, neighbour.j)));
        }

        loop {
            if !focus.is_empty() && focus.is_subset(&settled) {
                break;
            }
            let Some(Reverse((cost, i, j))) = heap.pop() else {
                break;
            };
            let current = Coord::new(i, j);
            if !settled.insert(current) {
                continue;
            }
            penalties[i][j] = cost;

            for neighbour in self.board.neighbours(&current) {
                if self.board.content(&neighbour).is_forbidden() {
                    continue;
                }
                let step = cost + 1 + self.risk(&neighbour, focus.contains(&neighbour))? as u64;
                heap.push(Reverse((step, neighbour.i, neighbour.j)));
            }
        }

        Ok(penalties)
    }
}
