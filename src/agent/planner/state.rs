use crate::hitman::prelude::*;
use crate::referee::Status;

/// The planner's action alphabet, mirroring the referee's phase-2 surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    TurnClockwise,
    TurnAntiClockwise,
    Move,
    KillTarget,
    NeutralizeGuard,
    NeutralizeCivil,
    TakeSuit,
    TakeWeapon,
    PutOnSuit,
}

impl Action {
    /// Every action, in expansion order.
    pub fn all() -> [Action; 9] {
        [
            Action::TurnClockwise,
            Action::TurnAntiClockwise,
            Action::Move,
            Action::KillTarget,
            Action::NeutralizeGuard,
            Action::NeutralizeCivil,
            Action::TakeSuit,
            Action::TakeWeapon,
            Action::PutOnSuit,
        ]
    }
}

/// An immutable snapshot of the agent and world progress during planning.
/// Successor expansion produces a fresh state per action; nothing is ever
/// mutated in place.
#[derive(Clone, Debug)]
pub struct State {
    pub position: Coord,
    pub orientation: Direction,
    pub has_suit: bool,
    pub is_suit_on: bool,
    pub has_weapon: bool,
    pub is_target_down: bool,
    /// Cells emptied along this path: neutralized people, picked-up items,
    /// the killed target.
    pub emptied: BTreeSet<Coord>,
    /// Accumulated cost; doubles as the A* g-score.
    pub penalties: u32,
    pub history: Vec<Action>,
}

/// State identity for the visited set: penalties and history are stripped,
/// so two paths reaching the same situation collapse into one node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateKey {
    position: Coord,
    orientation: Direction,
    has_suit: bool,
    is_suit_on: bool,
    has_weapon: bool,
    is_target_down: bool,
    emptied: BTreeSet<Coord>,
}

impl State {
    /// The state at the start of phase 2.
    pub fn initial(status: &Status) -> State {
        State {
            position: status.position,
            orientation: status.orientation,
            has_suit: false,
            is_suit_on: false,
            has_weapon: false,
            is_target_down: false,
            emptied: BTreeSet::new(),
            penalties: 0,
            history: vec![],
        }
    }

    /// The stripped identity of this state.
    pub fn key(&self) -> StateKey {
        StateKey {
            position: self.position,
            orientation: self.orientation,
            has_suit: self.has_suit,
            is_suit_on: self.is_suit_on,
            has_weapon: self.has_weapon,
            is_target_down: self.is_target_down,
            emptied: self.emptied.clone(),
        }
    }
}
