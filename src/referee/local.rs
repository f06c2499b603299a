use crate::hitman::prelude::*;

use super::{PhaseOutcome, Referee, Status};

/// Ground truth for a game: the full contents of every square plus the
/// agent's starting pose. Nothing in here is ever exposed to the agent
/// except through referee observations.
#[derive(Clone, Debug)]
pub struct World {
    m: usize,
    n: usize,
    grid: Vec<Vec<Content>>,
    start: Coord,
    start_facing: Direction,
}

impl World {
    /// Parses a world from token notation (see [`WorldString`]). The agent
    /// starts at the origin facing north unless overridden.
    pub fn parse(notation: &str) -> Result<World> {
        let WorldString { m, n, cells, .. } = notation.parse::<WorldString>()?;
        let world = World {
            m,
            n,
            grid: cells,
            start: Coord::new(0, 0),
            start_facing: Direction::North,
        };
        world.check_start()?;
        Ok(world)
    }

    /// Overrides the agent's starting pose.
    pub fn with_start(mut self, start: Coord, facing: Direction) -> Result<World> {
        self.start = start;
        self.start_facing = facing;
        self.check_start()?;
        Ok(self)
    }

    fn check_start(&self) -> Result<()> {
        if !self.contains(&self.start) || self.content(&self.start) != Content::Empty {
            return Err(anyhow!(HitmanError::InvalidArgument(format!(
                "start cell {} must exist and be empty",
                self.start
            ))));
        }
        Ok(())
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    pub fn content(&self, coord: &Coord) -> Content {
        self.grid[coord.i][coord.j]
    }

    fn contains(&self, coord: &Coord) -> bool {
        coord.i < self.m && coord.j < self.n
    }

    fn step(&self, coord: &Coord, direction: Direction, k: isize) -> Option<Coord> {
        let offset = coord + direction.offset().times(k);
        offset.in_bounds_signed(self.m, self.n).then(|| offset.coerce())
    }

    fn count_people(&self, filter: impl Fn(&Content) -> bool) -> usize {
        self.grid.iter().flatten().filter(|c| filter(c)).count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    One,
    Two,
}

/// The reference adjudicator: holds a [`World`], tracks the agent through
/// both phases, and charges penalties.
///
/// Accounting per action: 1 base penalty, plus 5 per guard sighting the
/// agent afterwards (suppressed in phase 2 while the disguise is worn),
/// plus the phase-2 surcharges (20 for a neutralization, 100 per witness of
/// a kill, neutralization or costume change).
pub struct LocalReferee {
    world: World,
    phase: Phase,
    position: Coord,
    orientation: Direction,
    penalties: u32,
    has_suit: bool,
    suit_on: bool,
    has_weapon: bool,
    target_down: bool,
    submission_ok: Option<bool>,
}

impl LocalReferee {
    pub fn new(world: World) -> LocalReferee {
        let (position, orientation) = (world.start, world.start_facing);
        LocalReferee {
            world,
            phase: Phase::Idle,
            position,
            orientation,
            penalties: 0,
            has_suit: false,
            suit_on: false,
            has_weapon: false,
            target_down: false,
            submission_ok: None,
        }
    }

    fn require_started(&self) -> Result<()> {
        if self.phase == Phase::Idle {
            return Err(anyhow!(HitmanError::StateUninitialized));
        }
        Ok(())
    }

    fn require_phase2(&self) -> Result<()> {
        if self.phase != Phase::Two {
            return Err(anyhow!(HitmanError::StateUninitialized));
        }
        Ok(())
    }

    /// How many guards currently see the given cell. A guard watches the
    /// two cells it faces, with the nearer one blocking the farther; an
    /// agent standing on a guest is not reported at all.
    fn guards_seeing(&self, coord: &Coord) -> u32 {
        if self.world.content(coord).is_person() {
            return 0;
        }
        let mut count = 0;
        for facing in Direction::all() {
            let toward = facing.opposite();
            let Some(first) = self.world.step(coord, toward, 1) else {
                continue;
            };
            match self.world.content(&first) {
                Content::Guard(d) if d == facing => count += 1,
                Content::Empty => {
                    if let Some(second) = self.world.step(coord, toward, 2) {
                        if self.world.content(&second) == Content::Guard(facing) {
                            count += 1;
                        }
                    }
                }
                _ => {}
            }
        }
        count
    }

    /// How many guests currently see the given cell; standing on a guest
    /// counts as being seen by that guest.
    fn guests_seeing(&self, coord: &Coord) -> u32 {
        if matches!(self.world.content(coord), Content::Guest(_)) {
            return 1;
        }
        let mut count = 0;
        for facing in Direction::all() {
            if let Some(cell) = self.world.step(coord, facing.opposite(), 1) {
                if self.world.content(&cell) == Content::Guest(facing) {
                    count += 1;
                }
            }
        }
        count
    }

    fn witnesses(&self) -> u32 {
        self.guards_seeing(&self.position) + self.guests_seeing(&self.position)
    }

    /// Charges one action with the given surcharge, then the sighting tax.
    fn charge(&mut self, surcharge: u32) {
        self.penalties += 1 + surcharge;
        if !(self.phase == Phase::Two && self.suit_on) {
            self.penalties += 5 * self.guards_seeing(&self.position);
        }
    }

    fn vision(&self) -> Vec<(Coord, Content)> {
        let mut seen = vec![];
        for k in 1..=3 {
            let Some(coord) = self.world.step(&self.position, self.orientation, k) else {
                break;
            };
            let content = self.world.content(&coord);
            seen.push((coord, content));
            if content != Content::Empty {
                break;
            }
        }
        seen
    }

    fn hear(&self) -> u32 {
        let mut count = 0;
        for di in -2..=2 {
            for dj in -2..=2 {
                let offset = self.position + OffsetCoord::new(di, dj);
                if offset.in_bounds_signed(self.world.m, self.world.n)
                    && self.world.content(&offset.coerce()).is_person()
                {
                    count += 1;
                }
            }
        }
        count.min(5)
    }

    fn status(&self) -> Status {
        Status {
            m: self.world.m,
            n: self.world.n,
            position: self.position,
            orientation: self.orientation,
            vision: self.vision(),
            hear: self.hear(),
            penalties: self.penalties,
            guard_count: self.world.count_people(|c| matches!(c, Content::Guard(_))),
            civil_count: self.world.count_people(|c| matches!(c, Content::Guest(_))),
        }
    }

    /// The cell the agent would neutralize or walk into.
    fn ahead(&self) -> Option<Coord> {
        self.world.step(&self.position, self.orientation, 1)
    }
}

impl Referee for LocalReferee {
    fn start_phase1(&mut self) -> Result<Status> {
        self.phase = Phase::One;
        self.position = self.world.start;
        self.orientation = self.world.start_facing;
        self.penalties = 0;
        Ok(self.status())
    }

    fn move_forward(&mut self) -> Result<Status> {
        self.require_started()?;
        if let Some(ahead) = self.ahead() {
            if !self.world.content(&ahead).is_forbidden() {
                self.position = ahead;
            }
        }
        self.charge(0);
        Ok(self.status())
    }

    fn turn_clockwise(&mut self) -> Result<Status> {
        self.require_started()?;
        self.orientation = self.orientation.clockwise();
        self.charge(0);
        Ok(self.status())
    }

    fn turn_anti_clockwise(&mut self) -> Result<Status> {
        self.require_started()?;
        self.orientation = self.orientation.counter_clockwise();
        self.charge(0);
        Ok(self.status())
    }

    fn send_content(&mut self, submission: &HashMap<Coord, Content>) -> Result<bool> {
        self.require_started()?;
        let (m, n) = self.world.dims();
        let complete = submission.len() == m * n;
        let correct = complete
            && submission.iter().all(|(coord, content)| {
                self.world.contains(coord) && self.world.content(coord) == *content
            });
        self.submission_ok = Some(correct);
        Ok(correct)
    }

    fn end_phase1(&mut self) -> Result<PhaseOutcome> {
        self.require_started()?;
        let (m, n) = self.world.dims();
        let score = match self.submission_ok {
            Some(true) => 2 * (m * n) as i64 - self.penalties as i64,
            _ => -(self.penalties as i64),
        };
        log::debug!("phase 1 over: score {score}, penalties {}", self.penalties);
        Ok(PhaseOutcome { score, penalties: self.penalties })
    }

    fn start_phase2(&mut self) -> Result<Status> {
        self.phase = Phase::Two;
        self.position = self.world.start;
        self.orientation = self.world.start_facing;
        self.penalties = 0;
        Ok(self.status())
    }

    fn kill_target(&mut self) -> Result<Status> {
        self.require_phase2()?;
        if !self.has_weapon || self.world.content(&self.position) != Content::Target {
            return Err(anyhow!(HitmanError::InvalidArgument(
                "kill requires the weapon and standing on the target".into()
            )));
        }
        let witnesses = self.witnesses();
        self.world.grid[self.position.i][self.position.j] = Content::Empty;
        self.target_down = true;
        self.charge(100 * witnesses);
        Ok(self.status())
    }

    fn neutralize_guard(&mut self) -> Result<Status> {
        self.require_phase2()?;
        let target = self.ahead().ok_or_else(|| {
            anyhow!(HitmanError::InvalidArgument("nothing ahead to neutralize".into()))
        })?;
        let Content::Guard(facing) = self.world.content(&target) else {
            return Err(anyhow!(HitmanError::InvalidArgument("no guard ahead".into())));
        };
        if facing == self.orientation.opposite() {
            return Err(anyhow!(HitmanError::InvalidArgument(
                "cannot neutralize a guard watching you".into()
            )));
        }
        let witnesses = self.witnesses();
        self.world.grid[target.i][target.j] = Content::Empty;
        self.charge(20 + 100 * witnesses);
        Ok(self.status())
    }

    fn neutralize_civil(&mut self) -> Result<Status> {
        self.require_phase2()?;
        let target = self.ahead().ok_or_else(|| {
            anyhow!(HitmanError::InvalidArgument("nothing ahead to neutralize".into()))
        })?;
        let Content::Guest(facing) = self.world.content(&target) else {
            return Err(anyhow!(HitmanError::InvalidArgument("no guest ahead".into())));
        };
        if facing == self.orientation.opposite() {
            return Err(anyhow!(HitmanError::InvalidArgument(
                "cannot neutralize a guest watching you".into()
            )));
        }
        let witnesses = self.witnesses();
        self.world.grid[target.i][target.j] = Content::Empty;
        self.charge(20 + 100 * witnesses);
        Ok(self.status())
    }

    fn take_suit(&mut self) -> Result<Status> {
        self.require_phase2()?;
        if self.has_suit || self.world.content(&self.position) != Content::Suit {
            return Err(anyhow!(HitmanError::InvalidArgument(
                "no suit to take here".into()
            )));
        }
        self.world.grid[self.position.i][self.position.j] = Content::Empty;
        self.has_suit = true;
        self.charge(0);
        Ok(self.status())
    }

    fn take_weapon(&mut self) -> Result<Status> {
        self.require_phase2()?;
        if self.has_weapon || self.world.content(&self.position) != Content::Rope {
            return Err(anyhow!(HitmanError::InvalidArgument(
                "no weapon to take here".into()
            )));
        }
        self.world.grid[self.position.i][self.position.j] = Content::Empty;
        self.has_weapon = true;
        self.charge(0);
        Ok(self.status())
    }

    fn put_on_suit(&mut self) -> Result<Status> {
        self.require_phase2()?;
        if !self.has_suit {
            return Err(anyhow!(HitmanError::InvalidArgument(
                "cannot wear a suit that was never taken".into()
            )));
        }
        let witnesses = self.witnesses();
        self.suit_on = true;
        self.charge(100 * witnesses);
        Ok(self.status())
    }

    fn end_phase2(&mut self) -> Result<PhaseOutcome> {
        self.require_phase2()?;
        if !self.target_down {
            log::warn!("phase 2 ended with the target still alive");
        }
        Ok(PhaseOutcome {
            score: -(self.penalties as i64),
            penalties: self.penalties,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::hitman::prelude::*;
    use crate::referee::Referee;

    use super::{LocalReferee, World};

    fn corridor() -> World {
        // 4x2; a guard at (3,0) looks west down the bottom row.
        World::parse(". . . .\n. . . GW").unwrap()
    }

    #[test]
    fn vision_truncates_at_the_first_occupied_cell() {
        let world = World::parse(". . . .\n. R T .")
            .unwrap()
            .with_start(Coord::new(0, 0), Direction::East)
            .unwrap();
        let mut referee = LocalReferee::new(world);
        let status = referee.start_phase1().unwrap();
        assert_eq!(
            status.vision,
            vec![(Coord::new(1, 0), Content::Rope)]
        );
        assert_eq!(status.hear, 0);
    }

    #[test]
    fn sightings_cost_five_per_guard_on_top_of_the_action() {
        let world = corridor().with_start(Coord::new(0, 0), Direction::East).unwrap();
        let mut referee = LocalReferee::new(world);
        let status = referee.start_phase1().unwrap();
        assert_eq!(status.penalties, 0);
        // Stepping to (1,0) enters the guard's line of sight: 1 + 5.
        let status = referee.move_forward().unwrap();
        assert_eq!(status.position, Coord::new(1, 0));
        assert_eq!(status.penalties, 6);
        // Turning in place while watched costs another 1 + 5.
        let status = referee.turn_clockwise().unwrap();
        assert_eq!(status.penalties, 12);
    }

    #[test]
    fn blocked_moves_still_cost_an_action() {
        let world = World::parse("# .").unwrap()
            .with_start(Coord::new(1, 0), Direction::West)
            .unwrap();
        let mut referee = LocalReferee::new(world);
        referee.start_phase1().unwrap();
        let status = referee.move_forward().unwrap();
        assert_eq!(status.position, Coord::new(1, 0));
        assert_eq!(status.penalties, 1);
    }

    #[test]
    fn hearing_saturates_at_five() {
        let world = World::parse("CN CN CN\nCN CN CN\n. . .").unwrap();
        let mut referee = LocalReferee::new(world);
        let status = referee.start_phase1().unwrap();
        assert_eq!(status.hear, 5);
        assert_eq!(status.civil_count, 6);
    }

    #[test]
    fn phase2_bookkeeping_for_a_clean_kill() {
        let world = World::parse(". T\nR .")
            .unwrap()
            .with_start(Coord::new(0, 1), Direction::South)
            .unwrap();
        let mut referee = LocalReferee::new(world);
        referee.start_phase2().unwrap();
        referee.move_forward().unwrap(); // onto the rope
        referee.take_weapon().unwrap();
        referee.turn_clockwise().unwrap(); // south -> west... and around
        referee.turn_clockwise().unwrap(); // north
        referee.move_forward().unwrap(); // back up
        referee.turn_clockwise().unwrap(); // east
        referee.move_forward().unwrap(); // onto the target
        let status = referee.kill_target().unwrap();
        assert_eq!(status.penalties, 8);
        let outcome = referee.end_phase2().unwrap();
        assert_eq!(outcome.score, -8);
    }

    #[test]
    fn actions_before_any_phase_are_rejected() {
        let mut referee = LocalReferee::new(corridor());
        assert!(referee.move_forward().is_err());
    }
}
