mod explore;
mod intel;
mod knowledge;
pub mod planner;
mod risk;

pub use intel::Intel;

use std::time::Duration;

use crate::hitman::prelude::*;
use crate::referee::{Referee, Status};
use crate::sat::SatSolver;

/// When the risk computation may consult the solver: `Auto` leaves it to
/// the call site, the other two force it on or off globally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SatMode {
    #[default]
    Auto,
    Sat,
    #[value(name = "no_sat")]
    NoSat,
}

impl std::fmt::Display for SatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SatMode::Auto => "auto",
            SatMode::Sat => "sat",
            SatMode::NoSat => "no_sat",
        };
        write!(f, "{name}")
    }
}

/// The phase-1 controller: repeatedly picks the cheapest unknown cell and
/// manoeuvres to a vantage point until the whole board is deduced.
///
/// The explorer drives the referee directly; every observation it receives
/// is folded into its [`Intel`] before the next decision.
pub struct Explorer<'a, R: Referee + ?Sized> {
    referee: &'a mut R,
    pub intel: Intel,
    status: Status,
    abandoned: HashSet<Coord>,
    display: bool,
    pace: Option<Duration>,
}

impl<'a, R: Referee + ?Sized> Explorer<'a, R> {
    /// Starts phase 1 on the referee and seeds the knowledge base: the
    /// exclusion clauses, the first observation, and the known-empty
    /// starting square.
    pub fn new(
        referee: &'a mut R,
        solver: Box<dyn SatSolver>,
        sat_mode: SatMode,
        display: bool,
        pace: Option<Duration>,
    ) -> Result<Explorer<'a, R>> {
        let status = referee.start_phase1()?;
        let mut intel = Intel::new(&status, solver, sat_mode)?;
        intel.absorb(&status)?;

        let start = status.position;
        intel.add_clause(vec![-intel.board.cell_to_var(&start, VarKind::Guard)]);
        intel.add_clause(vec![-intel.board.cell_to_var(&start, VarKind::Guest)]);
        intel.board.set_content(&start, Content::Empty)?;

        Ok(Explorer {
            referee,
            intel,
            status,
            abandoned: HashSet::new(),
            display,
            pace,
        })
    }

    /// Runs the exploration loop to completion. Goals whose every vantage
    /// turns out blocked are abandoned with a warning; the submission step
    /// then reports the incomplete board.
    pub fn run(&mut self) -> Result<()> {
        self.show();
        while let Some(goal) = self.next_goal()? {
            log::debug!("exploring {goal}");
            if let Err(err) = self.explore(&goal) {
                match err.downcast_ref::<HitmanError>() {
                    Some(HitmanError::Unreachable { .. }) => {
                        log::warn!("abandoning unreachable cell {goal}");
                        self.abandoned.insert(goal);
                    }
                    _ => return Err(err),
                }
            }
        }
        Ok(())
    }

    /// Releases the knowledge base once exploration is over.
    pub fn into_intel(self) -> Intel {
        self.intel
    }

    pub(crate) fn position(&self) -> Coord {
        self.status.position
    }

    pub(crate) fn facing(&self) -> Direction {
        self.status.orientation
    }

    pub(crate) fn is_abandoned(&self, coord: &Coord) -> bool {
        self.abandoned.contains(coord)
    }

    pub(crate) fn vision(&self) -> &[(Coord, Content)] {
        &self.status.vision
    }

    fn after_action(&mut self, status: Status) -> Result<()> {
        self.status = status;
        self.intel.absorb(&self.status)?;
        self.show();
        Ok(())
    }

    pub(crate) fn step_forward(&mut self) -> Result<()> {
        let status = self.referee.move_forward()?;
        self.after_action(status)
    }

    pub(crate) fn rotate_clockwise(&mut self) -> Result<()> {
        let status = self.referee.turn_clockwise()?;
        self.after_action(status)
    }

    pub(crate) fn rotate_anti_clockwise(&mut self) -> Result<()> {
        let status = self.referee.turn_anti_clockwise()?;
        self.after_action(status)
    }

    fn show(&self) {
        if self.display {
            println!("{}\n", self.intel.board);
        }
        if let Some(pace) = self.pace {
            std::thread::sleep(pace);
        }
    }
}
