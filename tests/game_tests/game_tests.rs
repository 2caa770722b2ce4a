//! Tests for Game
//!
//! These tests verify:
//! - Strict X/O turn alternation
//! - Rejected moves leave board and turn untouched
//! - Accepted moves change exactly one cell
//! - Win and draw outcomes
//! - No moves after the game is over

use tictacnet::game::{AbortReason, Cell, Game, MoveError, Outcome, Role};

// =============================================================================
// Helper Functions
// =============================================================================

/// Play a list of moves, asserting each one is accepted
fn play_all(game: &mut Game, moves: &[(i64, i64)]) -> Outcome {
    let mut outcome = Outcome::InProgress;
    for &(row, col) in moves {
        outcome = game.play(row, col).unwrap();
    }
    outcome
}

fn snapshot(game: &Game) -> Vec<Cell> {
    game.board().rows().flatten().copied().collect()
}

// =============================================================================
// Turn Order Tests
// =============================================================================

#[test]
fn test_x_moves_first() {
    let game = Game::new();

    assert_eq!(game.turn(), Role::X);
    assert_eq!(game.outcome(), &Outcome::InProgress);
    assert_eq!(game.moves_played(), 0);
}

#[test]
fn test_turns_alternate_on_legal_moves() {
    let mut game = Game::new();
    let moves = [(0, 0), (1, 1), (0, 1), (0, 2), (2, 0), (1, 0), (1, 2), (2, 1)];

    let mut expected = Role::X;
    for (row, col) in moves {
        assert_eq!(game.turn(), expected);
        let outcome = game.play(row, col).unwrap();
        assert_eq!(outcome, Outcome::InProgress);
        expected = expected.opponent();
    }
    assert_eq!(game.turn(), expected);
}

#[test]
fn test_rejected_move_keeps_turn() {
    let mut game = Game::new();
    game.play(1, 1).unwrap();

    assert!(game.play(1, 1).is_err());
    assert!(game.play(7, 0).is_err());

    assert_eq!(game.turn(), Role::O);
    assert_eq!(game.moves_played(), 1);
}

// =============================================================================
// Move Validation Tests
// =============================================================================

#[test]
fn test_occupied_cell_rejected_for_both_roles() {
    let mut game = Game::new();
    game.play(0, 0).unwrap(); // X
    let before = snapshot(&game);

    // O tries X's cell
    assert_eq!(game.play(0, 0), Err(MoveError::Occupied { row: 0, col: 0 }));
    assert_eq!(snapshot(&game), before);

    game.play(2, 2).unwrap(); // O
    let before = snapshot(&game);

    // X tries O's cell and its own
    assert_eq!(game.play(2, 2), Err(MoveError::Occupied { row: 2, col: 2 }));
    assert_eq!(game.play(0, 0), Err(MoveError::Occupied { row: 0, col: 0 }));
    assert_eq!(snapshot(&game), before);
}

#[test]
fn test_out_of_range_rejected() {
    let mut game = Game::new();
    let before = snapshot(&game);

    for (row, col) in [(5, 5), (-1, 0), (0, 3), (3, 3)] {
        assert_eq!(game.play(row, col), Err(MoveError::OutOfRange { row, col }));
    }

    assert_eq!(snapshot(&game), before);
    assert_eq!(game.turn(), Role::X);
}

#[test]
fn test_accepted_move_changes_exactly_one_cell() {
    let mut game = Game::new();
    let moves = [(1, 1), (0, 0), (2, 2), (0, 2), (0, 1)];

    for (row, col) in moves {
        let mover = game.turn();
        let before = snapshot(&game);

        game.play(row, col).unwrap();

        let after = snapshot(&game);
        let changed: Vec<usize> = (0..9).filter(|&i| before[i] != after[i]).collect();
        assert_eq!(changed, vec![(row * 3 + col) as usize]);
        assert_eq!(after[changed[0]], Cell::from(mover));
    }
}

// =============================================================================
// Outcome Tests
// =============================================================================

#[test]
fn test_row_win_for_x() {
    let mut game = Game::new();

    let outcome = play_all(&mut game, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);

    assert_eq!(outcome, Outcome::Win(Role::X));
    assert!(game.is_over());
    assert_eq!(
        game.board().row(0),
        &[Cell::X, Cell::X, Cell::X]
    );
}

#[test]
fn test_diagonal_win_for_o() {
    let mut game = Game::new();

    // O takes the anti-diagonal
    let outcome = play_all(&mut game, &[(0, 0), (0, 2), (0, 1), (1, 1), (2, 2), (2, 0)]);

    assert_eq!(outcome, Outcome::Win(Role::O));
    assert_eq!(game.turn(), Role::O);
}

#[test]
fn test_full_board_without_line_is_draw() {
    let mut game = Game::new();

    // X:(0,0),(0,1),(1,2),(2,0),(2,2)  O:(0,2),(1,0),(1,1),(2,1)
    let outcome = play_all(
        &mut game,
        &[(0, 0), (0, 2), (0, 1), (1, 0), (1, 2), (1, 1), (2, 0), (2, 1), (2, 2)],
    );

    assert_eq!(outcome, Outcome::Draw);
    assert!(game.board().is_full());
    assert_eq!(game.board().winner(), None);
}

#[test]
fn test_win_on_last_cell_is_win_not_draw() {
    let mut game = Game::new();

    // Ninth move fills the board and completes column 0
    // X: (0,0),(1,0),(0,2),(2,1),(2,0)  O: (0,1),(1,1),(1,2),(2,2)
    let outcome = play_all(
        &mut game,
        &[(0, 0), (0, 1), (1, 0), (1, 1), (0, 2), (1, 2), (2, 1), (2, 2), (2, 0)],
    );

    assert!(game.board().is_full());
    assert_eq!(outcome, Outcome::Win(Role::X));
}

#[test]
fn test_no_moves_after_game_over() {
    let mut game = Game::new();
    play_all(&mut game, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);

    assert_eq!(game.play(2, 0), Err(MoveError::GameOver));
    assert_eq!(game.moves_played(), 5);
}

#[test]
fn test_abort_only_applies_to_running_game() {
    let mut running = Game::new();
    running.abort(AbortReason::Disconnected(Role::O));
    assert_eq!(
        running.outcome(),
        &Outcome::Aborted(AbortReason::Disconnected(Role::O))
    );
    assert_eq!(running.play(0, 0), Err(MoveError::GameOver));

    let mut won = Game::new();
    play_all(&mut won, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);
    won.abort(AbortReason::Disconnected(Role::X));
    assert_eq!(won.outcome(), &Outcome::Win(Role::X));
}
