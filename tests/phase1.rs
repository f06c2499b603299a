use lib_hitman::prelude::*;
use pretty_assertions::assert_eq;

fn quiet_explorer<'a>(
    referee: &'a mut LocalReferee,
    sat_mode: SatMode,
) -> Explorer<'a, LocalReferee> {
    Explorer::new(referee, Box::new(VarisatSolver), sat_mode, false, None).unwrap()
}

fn synthetic_status(m: usize, n: usize, guards: usize, civils: usize) -> Status {
    Status {
        m,
        n,
        position: Coord::new(0, 0),
        orientation: Direction::North,
        vision: vec![],
        hear: 0,
        penalties: 0,
        guard_count: guards,
        civil_count: civils,
    }
}

#[test]
fn empty_two_by_two_is_fully_deduced_without_sightings() {
    let world = World::parse(". .\n. .")
        .unwrap()
        .with_start(Coord::new(0, 0), Direction::East)
        .unwrap();
    let mut referee = LocalReferee::new(world);

    let mut explorer = quiet_explorer(&mut referee, SatMode::Auto);
    explorer.run().unwrap();
    let board = explorer.into_intel().board;

    for coord in board.coords().collect::<Vec<_>>() {
        assert_eq!(board.content(&coord), Content::Empty, "cell {coord}");
    }

    let submission = board.submission().unwrap();
    assert!(referee.send_content(&submission).unwrap());
    let outcome = referee.end_phase1().unwrap();
    assert!(outcome.penalties > 0);
    assert_eq!(outcome.score, 8 - outcome.penalties as i64);
}

#[test]
fn corner_guard_is_deduced_and_the_submission_accepted() {
    let world = World::parse(". . GN\n. . .\n. . .")
        .unwrap()
        .with_start(Coord::new(0, 0), Direction::East)
        .unwrap();
    let mut referee = LocalReferee::new(world);

    let mut explorer = quiet_explorer(&mut referee, SatMode::Auto);
    explorer.run().unwrap();
    let board = explorer.into_intel().board;

    assert_eq!(board.content(&Coord::new(2, 2)), Content::Guard(Direction::North));
    assert_eq!(board.content(&Coord::new(1, 1)), Content::Empty);

    let submission = board.submission().unwrap();
    assert!(referee.send_content(&submission).unwrap());
    let outcome = referee.end_phase1().unwrap();
    assert_eq!(outcome.score, 18 - outcome.penalties as i64);
}

#[test]
fn known_guard_raises_the_risk_of_its_victims() {
    // A guard at (2,1) looking west watches (1,1); standing there must
    // rank at least one guaranteed sighting (risk 5) above any merely
    // possible one.
    let mut intel = Intel::new(
        &synthetic_status(3, 3, 1, 0),
        Box::new(VarisatSolver),
        SatMode::NoSat,
    )
    .unwrap();
    intel
        .board
        .set_content(&Coord::new(2, 1), Content::Guard(Direction::West))
        .unwrap();

    let watched = intel.risk(&Coord::new(1, 1), false).unwrap();
    assert!(watched >= 5, "risk {watched} should report a guaranteed sighting");
}

#[test]
fn pending_pair_resolves_to_the_other_member() {
    // The agent on (1,1) is seen by exactly one guard, and the only open
    // line is from the east: the guard looks west from (2,1) or (3,1).
    // Once (2,1) is seen empty, (3,1) must be committed.
    let mut intel = Intel::new(
        &synthetic_status(5, 3, 1, 0),
        Box::new(VarisatSolver),
        SatMode::Auto,
    )
    .unwrap();
    for (coord, content) in [
        (Coord::new(1, 1), Content::Empty),
        (Coord::new(0, 1), Content::Wall),
        (Coord::new(1, 0), Content::Wall),
        (Coord::new(1, 2), Content::Wall),
    ] {
        intel.board.set_content(&coord, content).unwrap();
    }

    // One action's worth of delta plus one sighting guard: 1 + 5.
    let sighted = Status {
        position: Coord::new(1, 1),
        orientation: Direction::North,
        hear: 1,
        penalties: 6,
        ..synthetic_status(5, 3, 1, 0)
    };
    intel.absorb(&sighted).unwrap();
    assert!(!intel.board.cell(&Coord::new(3, 1)).is_known());

    // Turning reveals (2,1) empty; the pair settles on (3,1).
    let revealed = Status {
        position: Coord::new(1, 1),
        orientation: Direction::East,
        vision: vec![(Coord::new(2, 1), Content::Empty)],
        hear: 1,
        penalties: 6,
        ..synthetic_status(5, 3, 1, 0)
    };
    intel.absorb(&revealed).unwrap();

    assert_eq!(
        intel.board.content(&Coord::new(3, 1)),
        Content::Guard(Direction::West)
    );
    // That was the last guard: everything still unknown is provably safe.
    assert!(intel.board.cell(&Coord::new(4, 2)).proven_not_guard());
}

#[test]
fn silence_lets_the_solver_refute_nearby_guards() {
    // Hearing zero people across the whole zone forces every cell's person
    // variables false, so the solver can prove any candidate harmless.
    let mut intel = Intel::new(
        &synthetic_status(3, 3, 1, 0),
        Box::new(VarisatSolver),
        SatMode::Sat,
    )
    .unwrap();
    intel.board.set_content(&Coord::new(1, 1), Content::Empty).unwrap();

    let silent = Status {
        position: Coord::new(1, 1),
        ..synthetic_status(3, 3, 1, 0)
    };
    intel.absorb(&silent).unwrap();

    assert_eq!(intel.risk(&Coord::new(0, 0), true).unwrap(), 0);
    assert!(intel.board.cell(&Coord::new(1, 0)).proven_not_guard());
}

#[test]
fn sighting_counts_come_from_the_penalty_delta() {
    let mut intel = Intel::new(
        &synthetic_status(5, 3, 2, 0),
        Box::new(VarisatSolver),
        SatMode::Auto,
    )
    .unwrap();
    intel.board.set_content(&Coord::new(1, 1), Content::Empty).unwrap();

    // Delta of 11 = one action plus two sighting guards.
    let status = Status {
        position: Coord::new(1, 1),
        hear: 2,
        penalties: 11,
        ..synthetic_status(5, 3, 2, 0)
    };
    intel.absorb(&status).unwrap();
    assert_eq!(intel.guards_seen_at(&Coord::new(1, 1)), Some(2));
    assert_eq!(intel.guards_seen_at(&Coord::new(0, 0)), None);
}
