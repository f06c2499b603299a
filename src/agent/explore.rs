use crate::hitman::prelude::*;
use crate::referee::Referee;

use super::Explorer;

impl<R: Referee + ?Sized> Explorer<'_, R> {
    /// Picks the next cell worth exploring: the unknown cell with the
    /// cheapest penalty path from the agent, ties broken by plain shortest
    /// distance. `None` once everything is known (or abandoned).
    pub(crate) fn next_goal(&mut self) -> Result<Option<Coord>> {
        let here = self.position();
        let penalties = self.intel.minimum_penalty_map(&here, &HashSet::new())?;

        let mut best: Option<Coord> = None;
        let mut best_penalty = u64::MAX;
        for candidate in self.intel.board.coords() {
            if candidate == here
                || self.intel.board.cell(&candidate).is_known()
                || self.is_abandoned(&candidate)
            {
                continue;
            }
            let penalty = penalties[candidate.i][candidate.j];
            if penalty == u64::MAX {
                continue;
            }
            if penalty < best_penalty {
                best_penalty = penalty;
                best = Some(candidate);
            } else if penalty == best_penalty {
                if let Some(chosen) = best {
                    if self.distance_from(&here, &candidate) < self.distance_from(&here, &chosen) {
                        best = Some(candidate);
                    }
                }
            }
        }
        Ok(best)
    }

    /// Determines the content of `goal` by walking to a vantage point and
    /// looking at it. Vantages that turn out blocked are recomputed from
    /// the obstacles discovered on the way; an empty vantage set means the
    /// cell cannot be observed.
    pub(crate) fn explore(&mut self, goal: &Coord) -> Result<()> {
        let mut vantages = self.vantages_of(goal);

        while !self.intel.board.cell(goal).is_known() && !vantages.is_empty() {
            // March toward the nearest worthwhile vantage. The goal can
            // become known on the way (a sighting deduction, say), which
            // makes the rest of the trip pointless.
            while !vantages.contains(&self.position()) && !self.intel.board.cell(goal).is_known() {
                let Some(next) = self.next_step(&vantages)? else {
                    return Err(anyhow!(HitmanError::Unreachable {
                        from: self.position(),
                        to: *goal,
                    }));
                };
                let evaded = self.turn_toward(&next)?;
                if self.intel.board.cell(goal).is_known() {
                    break;
                }
                if !self.intel.board.content(&next).is_forbidden() && !evaded {
                    self.step_forward()?;
                }
            }
            if self.intel.board.cell(goal).is_known() {
                break;
            }

            let evaded = self.turn_toward(goal)?;
            if !self.intel.board.cell(goal).is_known() && !evaded {
                // Something newly discovered hides the goal from here;
                // rebuild the vantage list against the updated board.
                vantages = self.vantages_of(goal);
            }
        }

        if self.intel.board.cell(goal).is_known() {
            Ok(())
        } else {
            Err(anyhow!(HitmanError::Unreachable { from: self.position(), to: *goal }))
        }
    }

    /// The cells from which `goal` is within line of sight.
    fn vantages_of(&self, goal: &Coord) -> Vec<Coord> {
        Direction::all()
            .iter()
            .flat_map(|d| self.intel.board.sight_line(goal, *d))
            .collect()
    }

    /// The non-forbidden neighbour that starts the cheapest path toward
    /// any vantage, ties broken by plain shortest distance to the agent.
    fn next_step(&mut self, vantages: &[Coord]) -> Result<Option<Coord>> {
        let here = self.position();
        let neighbours: Vec<Coord> = self
            .intel
            .board
            .neighbours(&here)
            .into_iter()
            .filter(|c| !self.intel.board.content(c).is_forbidden())
            .collect();
        let focus: HashSet<Coord> = neighbours.iter().copied().collect();

        let mut best: Option<Coord> = None;
        let mut best_penalty = u64::MAX;
        for vantage in vantages {
            let penalties = self.intel.minimum_penalty_map(vantage, &focus)?;
            for neighbour in &neighbours {
                let penalty = penalties[neighbour.i][neighbour.j];
                if penalty < best_penalty {
                    best_penalty = penalty;
                    best = Some(*neighbour);
                } else if penalty == best_penalty {
                    if let Some(chosen) = best {
                        if chosen != *neighbour
                            && self.distance_from(&here, neighbour) < self.distance_from(&here, &chosen)
                        {
                            best = Some(*neighbour);
                        }
                    }
                }
            }
        }
        Ok(best)
    }

    /// Rotates until `target` is dead ahead and reports whether the agent
    /// moved instead.
    ///
    /// Two refinements over blind rotation:
    /// - self-preservation: while being watched, if the square ahead is
    ///   standable and strictly safer, and some vantage of `target` has a
    ///   clean (or unvisited) record, keep walking rather than lingering;
    /// - an about-face rotates through whichever side has more unknown
    ///   cells in view, so the intermediate facing teaches something.
    pub(crate) fn turn_toward(&mut self, target: &Coord) -> Result<bool> {
        let here = self.position();
        if here.manhattan(target) > 3 {
            return Err(anyhow!(HitmanError::InvalidArgument(format!(
                "cell {target} cannot be faced from {here}"
            ))));
        }

        let ahead = self.vision().first().map(|&(coord, _)| coord);
        if let Some(ahead) = ahead {
            if !self.intel.board.content(&ahead).is_forbidden()
                && self.intel.guards_seen_at(&here).unwrap_or(0) > 0
                && self.intel.risk(&ahead, true)? < self.intel.risk(&here, true)?
            {
                let clean_vantage = self
                    .vantages_of(target)
                    .iter()
                    .any(|v| self.intel.guards_seen_at(v).is_none_or(|seen| seen == 0));
                if clean_vantage {
                    self.step_forward()?;
                    return Ok(true);
                }
            }
        }

        let desired = if target.i == here.i {
            if target.j > here.j { Direction::North } else { Direction::South }
        } else if target.j == here.j {
            if target.i > here.i { Direction::East } else { Direction::West }
        } else {
            return Err(anyhow!(HitmanError::InvalidArgument(format!(
                "cell {target} cannot be faced by turning on {here}"
            ))));
        };

        let current = self.facing();
        if desired == current.clockwise() {
            self.rotate_clockwise()?;
        } else if desired == current.counter_clockwise() {
            self.rotate_anti_clockwise()?;
        } else if desired == current.opposite() {
            let through = {
                let board = &self.intel.board;
                let unknowns = |d: Direction| {
                    board
                        .sight_line(&here, d)
                        .iter()
                        .filter(|c| !board.cell(c).is_known())
                        .count()
                };
                let (first, second) = match desired {
                    Direction::North | Direction::South => (Direction::West, Direction::East),
                    Direction::East | Direction::West => (Direction::North, Direction::South),
                };
                if unknowns(first) > unknowns(second) { first } else { second }
            };
            if current.clockwise() == through {
                self.rotate_clockwise()?;
                self.rotate_clockwise()?;
            } else {
                self.rotate_anti_clockwise()?;
                self.rotate_anti_clockwise()?;
            }
        }

        debug_assert_eq!(self.facing(), desired);
        Ok(false)
    }

    fn distance_from(&self, here: &Coord, to: &Coord) -> usize {
        self.intel.board.min_distance(here, to).unwrap_or(usize::MAX)
    }
}
