use lib_hitman::prelude::*;
use pretty_assertions::assert_eq;

/// Builds the planner's fully known board straight from world notation.
fn known_board(notation: &str) -> Board {
    let WorldString { m, n, cells, .. } = notation.parse::<WorldString>().unwrap();
    let mut board = Board::new(m, n).unwrap();
    for coord in board.coords().collect::<Vec<_>>() {
        board.set_content(&coord, cells[coord.i][coord.j]).unwrap();
    }
    board
}

/// Replays a plan against the referee and returns the final penalties.
fn replay(referee: &mut LocalReferee, actions: &[Action]) -> u32 {
    let mut penalties = 0;
    for action in actions {
        let status = match action {
            Action::Move => referee.move_forward(),
            Action::TurnClockwise => referee.turn_clockwise(),
            Action::TurnAntiClockwise => referee.turn_anti_clockwise(),
            Action::KillTarget => referee.kill_target(),
            Action::NeutralizeGuard => referee.neutralize_guard(),
            Action::NeutralizeCivil => referee.neutralize_civil(),
            Action::TakeSuit => referee.take_suit(),
            Action::TakeWeapon => referee.take_weapon(),
            Action::PutOnSuit => referee.put_on_suit(),
        }
        .expect("planned action should be legal for the referee");
        penalties = status.penalties;
    }
    penalties
}

#[test]
fn planner_and_referee_agree_on_the_cost_of_a_plan() {
    let notation = "S . . .\n. GS GS .\n. . . .\n. R . T";
    let world = World::parse(notation)
        .unwrap()
        .with_start(Coord::new(0, 0), Direction::East)
        .unwrap();
    let mut referee = LocalReferee::new(world);
    let status = referee.start_phase2().unwrap();

    let board = known_board(notation);
    let planner = Planner::new(&board);
    let finished = planner.plan(State::initial(&status), true).unwrap();

    let observed = replay(&mut referee, &finished.history);
    assert_eq!(observed, finished.penalties);
    assert_eq!(referee.end_phase2().unwrap().penalties, finished.penalties);
}

#[test]
fn neutralization_plan_survives_the_referee() {
    let notation = ". R GS . T";
    let world = World::parse(notation)
        .unwrap()
        .with_start(Coord::new(0, 0), Direction::East)
        .unwrap();
    let mut referee = LocalReferee::new(world);
    let status = referee.start_phase2().unwrap();

    let board = known_board(notation);
    let planner = Planner::new(&board);
    let finished = planner.plan(State::initial(&status), false).unwrap();

    assert!(finished.history.contains(&Action::NeutralizeGuard));
    let observed = replay(&mut referee, &finished.history);
    assert_eq!(observed, finished.penalties);
}

#[test]
fn full_mission_on_a_quiet_world() {
    let world = World::parse(". . T\n. . .\n. R .")
        .unwrap()
        .with_start(Coord::new(0, 0), Direction::East)
        .unwrap();
    let options = MissionOptions {
        log_level: None,
        sat: SatMode::Auto,
        display: false,
        temp: false,
        costume_combinations: false,
        map: None,
    };
    let mut mission = Mission::new(LocalReferee::new(world), options);
    let report = mission.run().unwrap();

    assert!(report.submission_accepted);
    assert_eq!(report.max_score, 18);
    assert_eq!(report.phase1.score, 18 - report.phase1.penalties as i64);
    assert!(report.phase2.penalties > 0);
    assert_eq!(report.total(), report.phase1.score + report.phase2.score);
}

#[test]
fn emptied_cells_change_what_the_guards_see() {
    let board = known_board(". CN GW");
    let planner = Planner::new(&board);
    let nobody = BTreeSet::new();

    // The guest blocks the guard's line until it is neutralized away.
    assert_eq!(planner.seen_by_guards(&Coord::new(0, 0), &nobody), 0);
    let cleared = BTreeSet::from([Coord::new(1, 0)]);
    assert_eq!(planner.seen_by_guards(&Coord::new(0, 0), &cleared), 1);

    // Standing on the guest hides the agent from guards but not from the
    // guest itself.
    assert_eq!(planner.seen_by_guards(&Coord::new(1, 0), &nobody), 0);
    assert_eq!(planner.seen_by_civil(&Coord::new(1, 0), &nobody), 1);
    assert_eq!(planner.seen_by_civil(&Coord::new(1, 0), &cleared), 0);
}

#[test]
fn demo_world_mission_completes_cleanly() {
    let world = World::parse(DEMO_WORLD).unwrap();
    let options = MissionOptions {
        log_level: None,
        sat: SatMode::Auto,
        display: false,
        temp: false,
        costume_combinations: true,
        map: None,
    };
    let mut mission = Mission::new(LocalReferee::new(world), options);
    let report = mission.run().unwrap();

    assert!(report.submission_accepted);
    assert_eq!(report.max_score, 70);
    assert_eq!(report.phase1.score, 70 - report.phase1.penalties as i64);
}
