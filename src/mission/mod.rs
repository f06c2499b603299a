mod options;

pub use options::MissionOptions;

use crate::agent::planner::{Action, Planner, State};
use crate::agent::Explorer;
use crate::hitman::prelude::*;
use crate::referee::{PhaseOutcome, Referee};
use crate::sat::VarisatSolver;

/// The world the binary plays when no map file is given.
pub const DEMO_WORLD: &str = "\
. . # . . CS .
. # . . GW . .
. . . # . . T
R . . . # . .
. . CN . . GN S
";

/// Final tally of a full game.
#[derive(Clone, Copy, Debug)]
pub struct MissionReport {
    pub phase1: PhaseOutcome,
    pub phase2: PhaseOutcome,
    pub submission_accepted: bool,
    /// The phase-1 score ceiling, `2 * m * n`.
    pub max_score: i64,
}

impl MissionReport {
    pub fn total(&self) -> i64 {
        self.phase1.score + self.phase2.score
    }
}

/// Drives a full game against a referee: the phase-1 exploration loop and
/// submission, then the phase-2 plan and its replay.
pub struct Mission<R: Referee> {
    referee: R,
    options: MissionOptions,
}

impl<R: Referee> Mission<R> {
    pub fn new(referee: R, options: MissionOptions) -> Mission<R> {
        Mission { referee, options }
    }

    pub fn run(&mut self) -> Result<MissionReport> {
        log::info!("phase 1 begins");
        let (board, submission_accepted, phase1) = self.phase_1()?;
        let (m, n) = board.dims();

        log::info!("phase 2 begins");
        let phase2 = self.phase_2(board)?;

        Ok(MissionReport {
            phase1,
            phase2,
            submission_accepted,
            max_score: 2 * (m * n) as i64,
        })
    }

    /// Explores until the board is deduced, then submits it.
    fn phase_1(&mut self) -> Result<(Board, bool, PhaseOutcome)> {
        let mut explorer = Explorer::new(
            &mut self.referee,
            Box::new(VarisatSolver),
            self.options.sat,
            self.options.display,
            self.options.pace(),
        )?;
        explorer.run()?;
        let board = explorer.into_intel().board;

        let submission_accepted = match board.submission() {
            Ok(mapping) => {
                let accepted = self.referee.send_content(&mapping)?;
                if !accepted {
                    log::warn!("{}", HitmanError::SubmissionRejected);
                }
                accepted
            }
            Err(err) => {
                log::warn!("cannot submit an incomplete board: {err}");
                false
            }
        };
        let outcome = self.referee.end_phase1()?;
        log::info!("phase 1 score: {} ({} penalties)", outcome.score, outcome.penalties);
        Ok((board, submission_accepted, outcome))
    }

    /// Plans the mission on the deduced board and replays the actions.
    fn phase_2(&mut self, mut board: Board) -> Result<PhaseOutcome> {
        let status = self.referee.start_phase2()?;
        board.set_hitman(status.position, status.orientation);

        let finished = {
            let planner = Planner::new(&board);
            planner.plan(State::initial(&status), self.options.costume_combinations)?
        };
        log::info!(
            "phase 2 plan: {} actions for {} penalties",
            finished.history.len(),
            finished.penalties
        );

        self.show(&board);
        for action in finished.history {
            self.execute(action, &mut board)?;
        }

        let outcome = self.referee.end_phase2()?;
        log::info!("phase 2 score: {} ({} penalties)", outcome.score, outcome.penalties);
        Ok(outcome)
    }

    /// Performs one planned action for real and keeps the board rendering
    /// in step with the world.
    fn execute(&mut self, action: Action, board: &mut Board) -> Result<()> {
        let (position, orientation) = board
            .hitman()
            .ok_or_else(|| anyhow!(HitmanError::StateUninitialized))?;

        let status = match action {
            Action::Move => self.referee.move_forward()?,
            Action::TurnClockwise => self.referee.turn_clockwise()?,
            Action::TurnAntiClockwise => self.referee.turn_anti_clockwise()?,
            Action::KillTarget => {
                let status = self.referee.kill_target()?;
                board.erase(&position)?;
                status
            }
            Action::NeutralizeGuard => {
                let status = self.referee.neutralize_guard()?;
                if let Some(ahead) = board.step(&position, orientation, 1) {
                    board.erase(&ahead)?;
                }
                status
            }
            Action::NeutralizeCivil => {
                let status = self.referee.neutralize_civil()?;
                if let Some(ahead) = board.step(&position, orientation, 1) {
                    board.erase(&ahead)?;
                }
                status
            }
            Action::TakeSuit => {
                let status = self.referee.take_suit()?;
                board.erase(&position)?;
                status
            }
            Action::TakeWeapon => {
                let status = self.referee.take_weapon()?;
                board.erase(&position)?;
                status
            }
            Action::PutOnSuit => {
                let status = self.referee.put_on_suit()?;
                board.put_suit();
                status
            }
        };

        board.set_hitman(status.position, status.orientation);
        self.show(board);
        Ok(())
    }

    fn show(&self, board: &Board) {
        if self.options.display {
            println!("{board}\n");
        }
        if let Some(pace) = self.options.pace() {
            std::thread::sleep(pace);
        }
    }
}
