use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::hitman::prelude::*;

use super::state::{Action, State};
use super::Goal;

/// The phase-2 planner: searches the fully known board for the cheapest
/// action sequence toward each goal.
pub struct Planner<'a> {
    pub board: &'a Board,
}

/// Heap entry: minimal f-score first, insertion order breaking ties.
struct Node {
    f: u32,
    seq: u64,
    state: State,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}
impl Eq for Node {}
impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap: lowest f (then earliest push) pops first.
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<'a> Planner<'a> {
    pub fn new(board: &'a Board) -> Planner<'a> {
        Planner { board }
    }

    /// How many guards see the given cell, accounting for cells emptied
    /// along the current path. A guard watches two cells ahead with the
    /// nearer cell blocking, and an agent standing on a (non-emptied)
    /// guest is not reported at all.
    pub fn seen_by_guards(&self, coord: &Coord, emptied: &BTreeSet<Coord>) -> u32 {
        if matches!(self.board.content(coord), Content::Guest(_)) && !emptied.contains(coord) {
            return 0;
        }
        let mut count = 0;
        for facing in Direction::all() {
            let toward = facing.opposite();
            let Some(first) = self.board.step(coord, toward, 1) else {
                continue;
            };
            let first_clear =
                emptied.contains(&first) || self.board.content(&first) == Content::Empty;
            if first_clear {
                if let Some(second) = self.board.step(coord, toward, 2) {
                    if self.board.content(&second) == Content::Guard(facing)
                        && !emptied.contains(&second)
                    {
                        count += 1;
                    }
                }
            } else if self.board.content(&first) == Content::Guard(facing) {
                count += 1;
            }
        }
        count
    }

    /// How many guests see the given cell; standing on a non-emptied guest
    /// counts as one (the guest underfoot reports the agent).
    pub fn seen_by_civil(&self, coord: &Coord, emptied: &BTreeSet<Coord>) -> u32 {
        if matches!(self.board.content(coord), Content::Guest(_)) && !emptied.contains(coord) {
            return 1;
        }
        let mut count = 0;
        for facing in Direction::all() {
            if let Some(cell) = self.board.step(coord, facing.opposite(), 1) {
                if self.board.content(&cell) == Content::Guest(facing) && !emptied.contains(&cell) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Simulates one action, or `None` when the rules forbid it. Costs:
    /// one base penalty per action, 20 for a neutralization, 100 per
    /// witness of a kill / neutralization / costume change, and 5 per
    /// sighting guard after the action while the disguise is off.
    pub fn apply(&self, action: Action, state: &State) -> Option<State> {
        let mut penalties = state.penalties + 1;
        let witnesses = self.seen_by_guards(&state.position, &state.emptied)
            + self.seen_by_civil(&state.position, &state.emptied);

        let mut next = match action {
            Action::Move => {
                let ahead = self.board.step(&state.position, state.orientation, 1)?;
                let standable = !self.board.content(&ahead).is_forbidden()
                    || state.emptied.contains(&ahead);
                if !standable {
                    return None;
                }
                let mut next = state.clone();
                next.position = ahead;
                next
            }
            Action::TurnClockwise => {
                let mut next = state.clone();
                next.orientation = state.orientation.clockwise();
                next
            }
            Action::TurnAntiClockwise => {
                let mut next = state.clone();
                next.orientation = state.orientation.counter_clockwise();
                next
            }
            Action::KillTarget => {
                if !state.has_weapon || self.board.content(&state.position) != Content::Target {
                    return None;
                }
                let mut next = state.clone();
                next.emptied.insert(state.position);
                next.is_target_down = true;
                penalties += 100 * witnesses;
                next
            }
            Action::NeutralizeGuard | Action::NeutralizeCivil => {
                let ahead = self.board.step(&state.position, state.orientation, 1)?;
                if state.emptied.contains(&ahead) {
                    return None;
                }
                let facing = match (action, self.board.content(&ahead)) {
                    (Action::NeutralizeGuard, Content::Guard(d)) => d,
                    (Action::NeutralizeCivil, Content::Guest(d)) => d,
                    _ => return None,
                };
                // A person watching the agent cannot be snuck up on.
                if facing == state.orientation.opposite() {
                    return None;
                }
                let mut next = state.clone();
                next.emptied.insert(ahead);
                penalties += 20 + 100 * witnesses;
                next
            }
            Action::TakeSuit => {
                if state.has_suit || self.board.content(&state.position) != Content::Suit {
                    return None;
                }
                let mut next = state.clone();
                next.emptied.insert(state.position);
                next.has_suit = true;
                next
            }
            Action::TakeWeapon => {
                if state.has_weapon || self.board.content(&state.position) != Content::Rope {
                    return None;
                }
                let mut next = state.clone();
                next.emptied.insert(state.position);
                next.has_weapon = true;
                next
            }
            Action::PutOnSuit => {
                if !state.has_suit {
                    return None;
                }
                let mut next = state.clone();
                next.is_suit_on = true;
                penalties += 100 * witnesses;
                next
            }
        };

        if !next.is_suit_on {
            penalties += 5 * self.seen_by_guards(&next.position, &next.emptied);
        }
        next.penalties = penalties;
        next.history.push(action);
        Some(next)
    }

    /// Every legal successor of a state.
    pub fn successors(&self, state: &State) -> Vec<State> {
        Action::all()
            .iter()
            .filter_map(|action| self.apply(*action, state))
            .collect()
    }

    /// Admissible lower bound on the cost of walking from `state` to
    /// `target`: Dijkstra backwards from the target, charging each step
    /// its base cost, the sighting tax (unless the disguise is on), and
    /// the neutralization surcharge when the step traverses a live guard.
    /// The queried cell itself contributes nothing; its sightings are
    /// already in the g-score.
    pub fn h_score(&self, target: &Coord, state: &State) -> Result<u32> {
        let (m, n) = self.board.dims();
        let emptied = &state.emptied;
        let mut costs = vec![vec![u32::MAX; n]; m];
        let mut settled: HashSet<Coord> = HashSet::new();
        let mut heap: BinaryHeap<Reverse<(u32, usize, usize)>> = BinaryHeap::new();

        let edge = |from: &Coord, to: &Coord| -> Option<u32> {
            if self.board.content(to) == Content::Wall {
                return None;
            }
            let mut cost = 1;
            if matches!(self.board.content(to), Content::Guard(_)) && !emptied.contains(to) {
                cost += 20
                    + 100 * (self.seen_by_guards(from, emptied) + self.seen_by_civil(from, emptied));
            }
            if !state.is_suit_on {
                cost += 5 * self.seen_by_guards(to, emptied);
            }
            Some(cost)
        };

        costs[target.i][target.j] = 0;
        settled.insert(*target);
        for neighbour in self.board.neighbours(target) {
            if let Some(cost) = edge(target, &neighbour) {
                heap.push(Reverse((cost, neighbour.i, neighbour.j)));
            }
        }

        while !settled.contains(&state.position) {
            let Some(Reverse((cost, i, j))) = heap.pop() else {
                return Err(anyhow!(HitmanError::Unreachable {
                    from: state.position,
                    to: *target,
                }));
            };
            let current = Coord::new(i, j);
            if !settled.insert(current) {
                continue;
            }
            costs[i][j] = cost;
            for neighbour in self.board.neighbours(&current) {
                if let Some(step) = edge(&current, &neighbour) {
                    heap.push(Reverse((cost + step, neighbour.i, neighbour.j)));
                }
            }
        }

        Ok(costs[state.position.i][state.position.j])
    }

    /// A* toward the given goal condition. States are deduplicated on
    /// their stripped keys; ties on f break by insertion order.
    pub fn search(&self, initial: State, goal: Goal) -> Result<State> {
        let target = self.locate_goal(goal)?;
        let mut visited = HashSet::from([initial.key()]);
        let mut heap: BinaryHeap<Node> = BinaryHeap::new();
        let mut seq = 0;

        let mut current = initial;
        while !goal.achieved_by(&current) {
            for successor in self.successors(&current) {
                if visited.contains(&successor.key()) {
                    continue;
                }
                let f = successor.penalties + self.h_score(&target, &successor)?;
                heap.push(Node { f, seq, state: successor });
                seq += 1;
            }
            let Some(node) = heap.pop() else {
                return Err(anyhow!(HitmanError::Unreachable {
                    from: current.position,
                    to: target,
                }));
            };
            current = node.state;
            visited.insert(current.key());
        }
        Ok(current)
    }

    /// The board cell a goal resolves to.
    fn locate_goal(&self, goal: Goal) -> Result<Coord> {
        let needle = match goal {
            Goal::ReturnHome => return Ok(Coord::new(0, 0)),
            Goal::GetWeapon => Content::Rope,
            Goal::KillTarget => Content::Target,
            Goal::GetSuit => Content::Suit,
        };
        self.board.locate(needle).ok_or_else(|| {
            anyhow!(HitmanError::InvalidArgument(format!("no {needle} on the board")))
        })
    }
}
