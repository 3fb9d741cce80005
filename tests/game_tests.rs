//! Game tests - full rounds driven through the public API

use std::cell::RefCell;
use std::rc::Rc;

use tui_dice::core::{Board, Cube, Game, SeededRng};
use tui_dice::types::{Direction, GameAction, HighlightState, Position, DEFAULT_ANGLE_STEP};

/// 5x5 board with all six values placed. Rolling left from the centre
/// lands on (1, 2) with 4 on top.
fn six_target_game() -> Game {
    let board = Board::with_targets(
        5,
        5,
        &[
            (Position::new(1, 2), 4),
            (Position::new(0, 0), 1),
            (Position::new(4, 0), 2),
            (Position::new(0, 4), 3),
            (Position::new(4, 4), 5),
            (Position::new(2, 0), 6),
        ],
    );
    let cube = Cube::new(board.start_position());
    let mut game = Game::new(board, cube, SeededRng::new(1));
    game.start();
    game
}

/// Roll one cell and tick until it lands. Returns false if the roll was
/// rejected.
fn roll(game: &mut Game, dir: Direction) -> bool {
    if !game.move_cube(dir) {
        return false;
    }
    let mut ticks = 0;
    while !game.tick(DEFAULT_ANGLE_STEP) {
        ticks += 1;
        assert!(ticks < 20, "roll never completed");
    }
    true
}

/// Follow hints until the round ends. Returns the number of hints used.
fn play_by_hints(game: &mut Game) -> usize {
    let mut hints = 0;
    while let Some(route) = game.hint() {
        hints += 1;
        for dir in route.directions {
            assert!(roll(game, dir));
        }
        assert!(hints <= 6, "more hints than targets");
    }
    hints
}

#[test]
fn test_first_roll_collects_four() {
    let mut game = six_target_game();
    let counts = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&counts);
    game.on_collected_count_changed(move |n| sink.borrow_mut().push(n));

    assert!(game.move_cube(Direction::Left));
    for _ in 0..9 {
        assert!(!game.tick(DEFAULT_ANGLE_STEP));
        assert_eq!(game.collected_count(), 0);
    }
    assert!(game.tick(DEFAULT_ANGLE_STEP));

    assert_eq!(game.cube().position(), Position::new(1, 2));
    assert_eq!(game.cube().top_value(), 4);
    assert_eq!(*counts.borrow(), vec![1]);
    assert!(game.is_active());
    assert!(!game.is_won());

    let highlight = game
        .board()
        .highlights()
        .into_iter()
        .find(|h| h.value == 1)
        .unwrap();
    assert_eq!(highlight.state, HighlightState::Current);
}

#[test]
fn test_recollecting_same_value_is_ignored() {
    let mut game = six_target_game();
    let counts = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&counts);
    game.on_collected_count_changed(move |_| *sink.borrow_mut() += 1);

    assert!(roll(&mut game, Direction::Left));
    assert!(roll(&mut game, Direction::Right));
    assert!(roll(&mut game, Direction::Left));

    assert_eq!(game.cube().top_value(), 4);
    assert_eq!(game.collected_count(), 1);
    assert_eq!(*counts.borrow(), 1);
    assert_eq!(game.move_count(), 3);
}

#[test]
fn test_wrong_value_collects_nothing() {
    let mut game = six_target_game();
    // Up, Left, Down reaches the 4 target with 1 on top.
    assert!(roll(&mut game, Direction::Up));
    assert!(roll(&mut game, Direction::Left));
    assert!(roll(&mut game, Direction::Down));
    assert_eq!(game.cube().position(), Position::new(1, 2));
    assert_eq!(game.cube().top_value(), 1);
    assert_eq!(game.collected_count(), 0);
    assert!(game.take_last_event().unwrap().collected.is_none());
}

#[test]
fn test_collects_away_from_first_target() {
    let mut game = six_target_game();
    // Up twice from the centre lands on (2, 0) with 6 on top.
    assert!(roll(&mut game, Direction::Up));
    assert!(roll(&mut game, Direction::Up));
    assert_eq!(game.cube().position(), Position::new(2, 0));
    assert_eq!(game.cube().top_value(), 6);
    assert_eq!(game.collected_values().iter().copied().collect::<Vec<_>>(), vec![6]);
}

#[test]
fn test_hint_driven_round_wins() {
    let mut game = six_target_game();
    let wins = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&wins);
    game.on_collected_count_changed(move |n| sink.borrow_mut().push(n));

    assert_eq!(play_by_hints(&mut game), 6);
    assert!(game.is_won());
    assert!(!game.is_active());
    assert_eq!(*wins.borrow(), vec![1, 2, 3, 4, 5, 6]);

    // Inputs are ignored once won.
    let moves = game.move_count();
    assert!(!game.move_cube(Direction::Left));
    assert_eq!(game.move_count(), moves);
}

#[test]
fn test_six_target_round_stays_active_until_last_landing() {
    let mut game = six_target_game();

    while let Some(route) = game.hint() {
        for dir in route.directions {
            assert!(game.move_cube(dir));
            let mut ticks = 0;
            loop {
                let landed = game.tick(DEFAULT_ANGLE_STEP);
                if landed {
                    break;
                }
                // Nothing changes before the landing tick, even on the last roll.
                assert!(game.is_active(), "inactive mid-roll at {} collected", game.collected_count());
                assert!(!game.is_won());
                ticks += 1;
                assert!(ticks < 20, "roll never completed");
            }

            if game.collected_count() < 6 {
                assert!(game.is_active(), "inactive after {} collected", game.collected_count());
                assert!(!game.is_won());
            }
        }
    }

    // Inactive on exactly the tick the sixth value landed.
    assert_eq!(game.collected_count(), 6);
    assert!(!game.is_active());
    assert!(game.is_won());
    assert!(game.take_last_event().unwrap().won);
}

#[test]
fn test_random_layouts_are_winnable() {
    for seed in 0..12 {
        let mut game = Game::with_seed(5, 5, seed);
        game.start();
        assert_eq!(play_by_hints(&mut game), 6, "seed {}", seed);
        assert!(game.is_won(), "seed {}", seed);
    }
}

#[test]
fn test_win_event_on_final_landing() {
    let board = Board::with_targets(5, 5, &[(Position::new(1, 2), 4)]);
    let cube = Cube::new(board.start_position());
    let mut game = Game::new(board, cube, SeededRng::new(1));
    game.start();

    assert!(game.move_cube(Direction::Left));
    assert!(game.is_active());
    while !game.tick(30.0) {}

    let event = game.take_last_event().unwrap();
    assert_eq!(event.collected, Some(4));
    assert!(event.won);
    assert!(game.is_won());
    assert!(!game.is_active());
}

#[test]
fn test_board_without_targets_never_wins() {
    let mut game = Game::with_seed(1, 1, 5);
    game.start();
    assert_eq!(game.board().target_cells_count(), 0);
    assert!(game.is_active());
    for dir in Direction::ALL {
        assert!(!game.move_cube(dir));
    }
    assert!(!game.is_won());
    assert!(game.hint().is_none());
}

#[test]
fn test_moves_counted_when_roll_starts() {
    let mut game = six_target_game();
    assert!(game.move_cube(Direction::Down));
    assert_eq!(game.move_count(), 1);
    assert!(!game.apply_action(GameAction::Roll(Direction::Up)));
    assert_eq!(game.move_count(), 1);

    while !game.tick(DEFAULT_ANGLE_STEP) {}
    assert_eq!(game.move_count(), 1);

    // Off-board rolls are not moves.
    assert!(roll(&mut game, Direction::Down));
    assert!(!game.move_cube(Direction::Down));
    assert_eq!(game.move_count(), 2);
}

#[test]
fn test_restart_mid_roll() {
    let mut game = six_target_game();
    assert!(roll(&mut game, Direction::Left));
    assert!(game.move_cube(Direction::Up));
    game.tick(DEFAULT_ANGLE_STEP);

    assert!(game.apply_action(GameAction::Restart));
    assert!(!game.is_cube_rotating());
    assert_eq!(game.cube().position(), Position::new(2, 2));
    assert_eq!(game.cube().top_value(), 1);
    assert_eq!(game.collected_count(), 0);
    assert_eq!(game.move_count(), 0);
    assert!(game.board().check_target_cell(1, 2, 4));

    // The same value can be collected again in the new round.
    assert!(roll(&mut game, Direction::Left));
    assert_eq!(game.collected_count(), 1);
}

#[test]
fn test_snapshot_round_trip_of_progress() {
    let mut game = six_target_game();
    assert!(roll(&mut game, Direction::Left));

    let snap = game.snapshot();
    assert_eq!(snap.collected.as_slice(), &[4]);
    assert_eq!(snap.target_count, 6);
    assert_eq!(snap.move_count, 1);
    assert_eq!(snap.cube.position, Position::new(1, 2));
    assert_eq!(snap.cube.orientation.top(), 4);
    assert!(snap.playable());
    assert_eq!(snap.round_id, 1);
}
