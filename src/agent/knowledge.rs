use crate::hitman::prelude::*;
use crate::referee::Status;

use super::intel::{Intel, PendingPair};

impl Intel {
    /// Merges one referee observation into the knowledge base.
    ///
    /// Three evidence channels feed it, each gated so the expensive work
    /// runs once: the penalty delta and the hearing report on the first
    /// visit to a position, the vision list on the first time a
    /// (position, facing) state is entered. The order matters - sighting
    /// deductions may commit guards that the hearing arithmetic then
    /// treats as known.
    pub fn absorb(&mut self, status: &Status) -> Result<()> {
        let here = status.position;
        let facing = status.orientation;

        let first_visit = self.visited_positions.insert(here);
        let first_state = self.visited_states.insert((here, facing));

        if first_visit {
            self.absorb_sightings(status, &here)?;
        }
        self.old_penalty = status.penalties;

        if first_state {
            self.absorb_vision(status)?;
        }

        if first_visit {
            self.absorb_hearing(status, &here)?;
        }

        self.board.set_hitman(here, facing);
        Ok(())
    }

    /// Penalty channel: the delta since the previous action is one base
    /// cost plus five per sighting guard, which pins down how many guards
    /// watch this cell - and sometimes which cells they stand on.
    fn absorb_sightings(&mut self, status: &Status, here: &Coord) -> Result<()> {
        let delta = status.penalties - self.old_penalty;
        let seen = delta.saturating_sub(1) / 5;
        self.record_sighting(here, seen);

        let standing = self.board.content(here);
        if !standing.is_known() || matches!(standing, Content::Guest(_)) {
            return Ok(());
        }

        let candidates = self.board.guard_candidates(here);
        let all_vars: Vec<i32> = candidates
            .values()
            .flatten()
            .map(|c| self.board.cell_to_var(c, VarKind::Guard))
            .collect();
        if seen as usize > all_vars.len() {
            return Err(anyhow!(HitmanError::LogicalContradiction));
        }
        self.add_clauses(cnf::at_least(seen as usize, &all_vars));

        let occupied_directions = candidates.values().filter(|cells| !cells.is_empty()).count();
        if occupied_directions != seen as usize {
            return Ok(());
        }

        // Every non-empty direction hides exactly one sighting guard.
        for facing in Direction::all() {
            let cells = candidates[&facing].clone();
            if cells.is_empty() {
                continue;
            }
            let direction_vars: Vec<i32> =
                cells.iter().map(|c| self.board.cell_to_var(c, VarKind::Guard)).collect();
            self.add_clauses(cnf::at_least(1, &direction_vars));

            match cells.as_slice() {
                [only] => {
                    if !self.board.cell(only).is_known() {
                        self.commit_guard(only, facing)?;
                    }
                    let settled = *only;
                    self.pending.retain(|pair| pair.other(&settled).is_none());
                }
                [a, b] => {
                    self.pending.push(PendingPair { facing, cells: [*a, *b] });
                }
                _ => unreachable!("guard candidate lists hold at most two cells"),
            }
        }
        Ok(())
    }

    /// Vision channel: every seen cell becomes known, the person counters
    /// shrink, and the clause base gains the matching unit clauses.
    fn absorb_vision(&mut self, status: &Status) -> Result<()> {
        for (coord, content) in &status.vision {
            if self.board.cell(coord).is_known() {
                continue;
            }
            self.board.set_content(coord, *content)?;

            match content {
                Content::Guest(_) => {
                    self.note_guest_identified();
                    self.board.prove_not_guard(coord);
                }
                Content::Guard(_) => self.note_guard_identified(),
                _ => self.board.prove_not_guard(coord),
            }

            self.reconcile_pending(coord, *content)?;

            match content {
                Content::Guest(_) => {
                    self.add_clause(vec![self.board.cell_to_var(coord, VarKind::Guest)]);
                }
                Content::Guard(_) => {
                    self.add_clause(vec![self.board.cell_to_var(coord, VarKind::Guard)]);
                }
                _ => {
                    self.add_clause(vec![-self.board.cell_to_var(coord, VarKind::Guest)]);
                    self.add_clause(vec![-self.board.cell_to_var(coord, VarKind::Guard)]);
                }
            }
        }
        Ok(())
    }

    /// A revealed pair member settles its pair: if the reveal is not the
    /// hypothesised guard, the partner must be it.
    fn reconcile_pending(&mut self, coord: &Coord, content: Content) -> Result<()> {
        let touched: Vec<(usize, Coord, Direction)> = self
            .pending
            .iter()
            .enumerate()
            .filter_map(|(idx, pair)| pair.other(coord).map(|other| (idx, other, pair.facing)))
            .collect();

        for (idx, other, facing) in touched.into_iter().rev() {
            self.pending.remove(idx);
            if content != Content::Guard(facing) && !self.board.cell(&other).is_known() {
                self.commit_guard(&other, facing)?;
            }
        }
        Ok(())
    }

    /// Hearing channel: the report saturates at five. An exact count pins
    /// the unknown audible cells with an `exactly` constraint, with known
    /// persons subtracted; a saturated count only bounds from below, and
    /// known persons stay in the clause.
    fn absorb_hearing(&mut self, status: &Status, here: &Coord) -> Result<()> {
        let mut heard = status.hear;
        let mut open_cells = vec![];

        for coord in self.board.audible_cells(here) {
            let content = self.board.content(&coord);
            if !content.is_known() {
                open_cells.push(coord);
            } else if content.is_person() {
                if status.hear < 5 {
                    heard = heard
                        .checked_sub(1)
                        .ok_or_else(|| anyhow!(HitmanError::LogicalContradiction))?;
                } else {
                    open_cells.push(coord);
                }
            }
        }

        let vars: Vec<i32> = open_cells
            .iter()
            .map(|c| self.board.cell_to_var(c, VarKind::Guest))
            .chain(open_cells.iter().map(|c| self.board.cell_to_var(c, VarKind::Guard)))
            .collect();

        if heard == 5 {
            if vars.len() < 5 {
                return Err(anyhow!(HitmanError::LogicalContradiction));
            }
            self.add_clauses(cnf::at_least(5, &vars));
        } else {
            if heard as usize > vars.len() {
                return Err(anyhow!(HitmanError::LogicalContradiction));
            }
            self.add_clauses(cnf::exactly(heard as usize, &vars));
        }
        Ok(())
    }
}
