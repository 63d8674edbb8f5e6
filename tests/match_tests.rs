use seabattle::{
    Board, CellStatus, Coordinate, Match, MatchError, MatchResult, Orientation, Phase,
    ShotOutcome, Side,
};

fn c(x: u8, y: u8) -> Coordinate {
    Coordinate::new(x, y)
}

/// A legal full fleet in placement order.
const LAYOUT: [(u8, u8, Orientation); 10] = [
    (0, 0, Orientation::Horizontal),
    (5, 0, Orientation::Horizontal),
    (0, 2, Orientation::Horizontal),
    (4, 2, Orientation::Horizontal),
    (8, 2, Orientation::Vertical),
    (0, 4, Orientation::Horizontal),
    (0, 6, Orientation::Horizontal),
    (2, 6, Orientation::Horizontal),
    (4, 6, Orientation::Horizontal),
    (6, 6, Orientation::Horizontal),
];

fn place_layout(game: &mut Match) {
    for (x, y, orientation) in LAYOUT {
        let placed = game.place_local(c(x, y), orientation).unwrap();
        assert!(placed.is_some(), "layout ship at ({}, {}) rejected", x, y);
    }
}

fn layout_board() -> Board {
    let mut board = Board::new();
    for (x, y, orientation) in LAYOUT {
        let size = board.next_ship_size().unwrap();
        board = board.with_ship(c(x, y), size, orientation).unwrap().0;
    }
    board
}

/// Both sides placed and ready, with the opponent fleet held locally.
fn started(first_turn: Side) -> Match {
    let mut game = Match::new(first_turn);
    place_layout(&mut game);
    game.set_opponent_fleet(layout_board()).unwrap();
    game.mark_ready(Side::Local).unwrap();
    game
}

#[test]
fn test_placement_follows_fleet_order() {
    let mut game = Match::new(Side::Local);
    assert_eq!(game.phase(), Phase::Placement);
    assert_eq!(game.next_ship_size(), Some(4));

    // out of bounds: silently rejected, progress unchanged
    assert_eq!(game.place_local(c(8, 0), Orientation::Horizontal), Ok(None));
    assert_eq!(game.next_ship_size(), Some(4));

    assert!(game.place_local(c(0, 0), Orientation::Horizontal).unwrap().is_some());
    assert_eq!(game.next_ship_size(), Some(3));

    // touching the first ship diagonally
    assert_eq!(game.place_local(c(4, 1), Orientation::Horizontal), Ok(None));
    assert_eq!(game.next_ship_size(), Some(3));
}

#[test]
fn test_full_fleet_rejects_more_ships() {
    let mut game = Match::new(Side::Local);
    place_layout(&mut game);
    assert_eq!(game.next_ship_size(), None);
    assert_eq!(
        game.place_local(c(9, 9), Orientation::Horizontal),
        Err(MatchError::FleetComplete)
    );
}

#[test]
fn test_ready_requires_full_fleet() {
    let mut game = Match::new(Side::Local);
    assert_eq!(game.mark_ready(Side::Local), Err(MatchError::FleetIncomplete));
    assert!(!game.is_ready(Side::Local));

    // opponent readiness alone does not start play
    game.mark_ready(Side::Opponent).unwrap();
    assert_eq!(game.phase(), Phase::Placement);

    place_layout(&mut game);
    game.mark_ready(Side::Local).unwrap();
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.turn(), Side::Local);

    // placement is over
    assert!(matches!(
        game.place_local(c(9, 9), Orientation::Horizontal),
        Err(MatchError::WrongPhase { .. })
    ));
}

#[test]
fn test_incomplete_opponent_fleet_is_rejected() {
    let mut game = Match::new(Side::Local);
    let (partial, _) = Board::new()
        .with_ship(c(0, 0), 4, Orientation::Horizontal)
        .unwrap();
    assert_eq!(game.set_opponent_fleet(partial), Err(MatchError::FleetIncomplete));
    assert!(!game.is_ready(Side::Opponent));
}

#[test]
fn test_shots_before_play_are_rejected() {
    let mut game = Match::new(Side::Local);
    assert!(matches!(
        game.validate_shot(Side::Local, c(0, 0)),
        Err(MatchError::WrongPhase { expected: Phase::Playing, actual: Phase::Placement })
    ));
    assert!(matches!(
        game.fire(Side::Local, c(0, 0)),
        Err(MatchError::WrongPhase { .. })
    ));
}

#[test]
fn test_hit_keeps_turn_and_miss_passes_it() {
    let mut game = started(Side::Local);

    assert_eq!(game.fire(Side::Local, c(0, 0)), Ok(ShotOutcome::Hit));
    assert_eq!(game.turn(), Side::Local);

    assert_eq!(game.fire(Side::Local, c(9, 9)), Ok(ShotOutcome::Miss));
    assert_eq!(game.turn(), Side::Opponent);
    assert_eq!(
        game.fire(Side::Local, c(1, 0)),
        Err(MatchError::NotYourTurn(Side::Local))
    );

    assert_eq!(game.fire(Side::Opponent, c(9, 8)), Ok(ShotOutcome::Miss));
    assert_eq!(game.turn(), Side::Local);
    assert_eq!(game.local_board().status(c(9, 8)), Some(CellStatus::Miss));
}

#[test]
fn test_already_shot_keeps_turn_and_board() {
    let mut game = started(Side::Local);
    game.fire(Side::Local, c(0, 0)).unwrap();
    let before = game.clone();
    assert_eq!(game.fire(Side::Local, c(0, 0)), Ok(ShotOutcome::AlreadyShot));
    assert_eq!(game, before);
    assert_eq!(
        game.validate_shot(Side::Local, c(0, 0)),
        Err(MatchError::AlreadyFired(c(0, 0)))
    );
    assert_eq!(
        game.validate_shot(Side::Local, c(10, 0)),
        Err(MatchError::AlreadyFired(c(10, 0)))
    );
}

#[test]
fn test_sinking_every_ship_wins() {
    let mut game = started(Side::Local);
    let targets: Vec<Coordinate> = game
        .opponent_board()
        .ships()
        .iter()
        .flat_map(|s| s.coords().to_vec())
        .collect();
    assert_eq!(targets.len(), 20);

    for (i, at) in targets.iter().enumerate() {
        let outcome = game.fire(Side::Local, *at).unwrap();
        assert!(outcome.keeps_turn());
        if i + 1 < targets.len() {
            assert_eq!(game.phase(), Phase::Playing);
        }
    }

    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.winner(), Some(Side::Local));
    assert!(game.opponent_board().is_defeated());
    assert!(matches!(
        game.fire(Side::Local, c(9, 9)),
        Err(MatchError::WrongPhase { .. })
    ));

    // a late disconnect does not erase the winner
    game.abort();
    assert_eq!(game.result(), Some(MatchResult::Winner(Side::Local)));
}

#[test]
fn test_abort_ends_match_without_winner() {
    let mut game = started(Side::Opponent);
    game.abort();
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.result(), Some(MatchResult::Aborted));
    assert_eq!(game.winner(), None);
}

#[test]
fn test_reset_returns_to_placement() {
    let mut game = started(Side::Opponent);
    assert_eq!(game.turn(), Side::Opponent);
    game.fire(Side::Opponent, c(0, 0)).unwrap();
    game.reset();

    assert_eq!(game, Match::new(Side::Opponent));
    assert_eq!(game.phase(), Phase::Placement);
    assert_eq!(game.local_board(), &Board::new());
    assert!(!game.is_ready(Side::Local));
    assert!(!game.is_ready(Side::Opponent));
}

#[test]
fn test_remote_outcomes_build_the_view() {
    let mut game = Match::new(Side::Local);
    place_layout(&mut game);
    game.mark_ready(Side::Opponent).unwrap();
    game.mark_ready(Side::Local).unwrap();

    game.record_remote_outcome(c(4, 4), &ShotOutcome::Hit).unwrap();
    assert_eq!(game.opponent_board().status(c(4, 4)), Some(CellStatus::Hit));
    assert_eq!(game.turn(), Side::Local);

    assert_eq!(
        game.record_remote_outcome(c(5, 5), &ShotOutcome::AlreadyShot),
        Err(MatchError::UnreportableOutcome)
    );
    assert_eq!(
        game.record_remote_outcome(c(4, 4), &ShotOutcome::Miss),
        Err(MatchError::AlreadyFired(c(4, 4)))
    );

    game.record_remote_outcome(c(4, 5), &ShotOutcome::Sunk(vec![c(4, 4), c(4, 5)]))
        .unwrap();
    assert_eq!(game.opponent_board().status(c(4, 4)), Some(CellStatus::Sunk));
    assert_eq!(game.opponent_board().status(c(3, 6)), Some(CellStatus::Miss));
    assert_eq!(game.turn(), Side::Local);

    game.record_remote_outcome(c(0, 0), &ShotOutcome::Miss).unwrap();
    assert_eq!(game.turn(), Side::Opponent);
    assert_eq!(
        game.record_remote_outcome(c(1, 1), &ShotOutcome::Miss),
        Err(MatchError::NotYourTurn(Side::Local))
    );
}

#[test]
fn test_side_other() {
    assert_eq!(Side::Local.other(), Side::Opponent);
    assert_eq!(Side::Opponent.other(), Side::Local);
}
