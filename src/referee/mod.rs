mod local;

pub use local::{LocalReferee, World};

use crate::hitman::prelude::*;

/// Everything the agent is told after an action (or at a phase start).
#[derive(Clone, Debug)]
pub struct Status {
    /// Board columns.
    pub m: usize,
    /// Board rows.
    pub n: usize,
    pub position: Coord,
    pub orientation: Direction,
    /// The cells ahead of the agent and their contents, nearest first.
    pub vision: Vec<(Coord, Content)>,
    /// How many people are audible around the agent, saturating at 5.
    pub hear: u32,
    /// Cumulative penalty count for the running phase.
    pub penalties: u32,
    pub guard_count: usize,
    pub civil_count: usize,
}

/// Score report at the end of a phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseOutcome {
    pub score: i64,
    pub penalties: u32,
}

/// The adjudicating oracle. All operations are synchronous; each action
/// returns the refreshed [`Status`], and the penalty delta between two
/// statuses is attributable to exactly the action between them.
pub trait Referee {
    fn start_phase1(&mut self) -> Result<Status>;
    fn move_forward(&mut self) -> Result<Status>;
    fn turn_clockwise(&mut self) -> Result<Status>;
    fn turn_anti_clockwise(&mut self) -> Result<Status>;
    /// Verifies a phase-1 submission covering every cell of the board.
    fn send_content(&mut self, submission: &HashMap<Coord, Content>) -> Result<bool>;
    fn end_phase1(&mut self) -> Result<PhaseOutcome>;

    fn start_phase2(&mut self) -> Result<Status>;
    fn kill_target(&mut self) -> Result<Status>;
    fn neutralize_guard(&mut self) -> Result<Status>;
    fn neutralize_civil(&mut self) -> Result<Status>;
    fn take_suit(&mut self) -> Result<Status>;
    fn take_weapon(&mut self) -> Result<Status>;
    fn put_on_suit(&mut self) -> Result<Status>;
    fn end_phase2(&mut self) -> Result<PhaseOutcome>;
}
