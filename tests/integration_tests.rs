//! Integration tests for tictac-rust
//!
//! Board properties are checked across several grid sides; match-level tests
//! drive `Game` through its public API only.

use fastrand::Rng;

use tictac_rust::Error;
use tictac_rust::board::{Board, Line, Mark, Outcome};
use tictac_rust::game::{Game, MatchConfig, Mode};
use tictac_rust::moves::Move;
use tictac_rust::player::Participant;
use tictac_rust::playout::random_playout;

// =============================================================================
// Helper functions
// =============================================================================

/// Board of side `n` with `mark` on every cell of `line`.
fn fill_line(n: usize, line: Line, mark: Mark) -> Board {
    let mut board = Board::new(n).unwrap();
    for index in line.indices(n) {
        board.apply_move(Move::new(index, mark)).unwrap();
    }
    board
}

/// Full board with no monochrome line, for any `n >= 3`.
///
/// Rows repeat XXOO with a per-row offset of 0, 2, 1, 3, 0, ... columns:
///
/// ```text
/// XXOO
/// OOXX
/// XOOX
/// OXXO
/// ```
fn drawn_board(n: usize) -> Board {
    let mut cells = String::new();
    for row in 0..n {
        for col in 0..n {
            let phase = (col + 2 * (row % 2) + (row / 2) % 2) / 2 % 2;
            cells.push(if phase == 0 { 'X' } else { 'O' });
        }
    }
    cells.parse().unwrap()
}

// =============================================================================
// Board creation and queries
// =============================================================================

#[test]
fn test_create_has_n_squared_empty_cells() {
    for n in 1..=8 {
        let board = Board::new(n).unwrap();
        assert_eq!(board.cell_count(), n * n);
        assert_eq!(board.empty_count(), n * n);
        assert_eq!(board.first_empty_index(), Some(0));
    }
}

#[test]
fn test_invalid_size() {
    assert!(matches!(Board::new(0), Err(Error::InvalidSize { size: 0 })));
}

#[test]
fn test_one_mark_is_in_progress() {
    for n in 2..=6 {
        for index in 0..n * n {
            let board = Board::new(n)
                .unwrap()
                .with_move(Move::new(index, Mark::X))
                .unwrap();
            assert_eq!(board.evaluate_outcome(), Outcome::InProgress, "n={n} index={index}");
        }
    }
}

#[test]
fn test_first_empty_index_scans_from_zero() {
    let mut board = Board::new(3).unwrap();
    for (i, index) in [0, 1, 2].into_iter().enumerate() {
        let mark = if i % 2 == 0 { Mark::X } else { Mark::O };
        board.apply_move(Move::new(index, mark)).unwrap();
    }
    assert_eq!(board.first_empty_index(), Some(3));
}

// =============================================================================
// Win and draw detection
// =============================================================================

#[test]
fn test_every_row_column_and_diagonal_wins() {
    for n in 3..=7 {
        let lines: Vec<Line> = Board::new(n).unwrap().lines().collect();
        assert_eq!(lines.len(), 2 * n + 2);
        for line in lines {
            for mark in Mark::ALL {
                let board = fill_line(n, line, mark);
                assert_eq!(board.evaluate_outcome(), Outcome::Win(mark), "n={n} {line:?}");
            }
        }
    }
}

#[test]
fn test_broken_diagonal_is_not_a_win() {
    // Main diagonal with its last cell taken by the opponent.
    let mut board = Board::new(5).unwrap();
    for index in Line::Diagonal.indices(5).take(4) {
        board.apply_move(Move::new(index, Mark::X)).unwrap();
    }
    board.apply_move(Move::new(24, Mark::O)).unwrap();
    assert_eq!(board.evaluate_outcome(), Outcome::InProgress);
}

#[test]
fn test_short_sub_diagonals_do_not_win() {
    // A three-long diagonal on a 4x4 board is not a winning line.
    let board: Board = ".X.. ..X. ...X ....".parse().unwrap();
    assert_eq!(board.evaluate_outcome(), Outcome::InProgress);
}

#[test]
fn test_alternating_fill_draws() {
    for n in 3..=8 {
        let board = drawn_board(n);
        assert!(board.is_full());
        assert_eq!(board.evaluate_outcome(), Outcome::Draw, "n={n}\n{board}");
    }
}

#[test]
fn test_random_playouts_end_consistently() {
    let mut rng = Rng::with_seed(99);
    for n in 2..=5 {
        for _ in 0..25 {
            let mut board = Board::new(n).unwrap();
            let outcome = random_playout(&mut board, Mark::X, &mut rng).unwrap();
            match outcome {
                Outcome::Draw => assert!(board.is_full()),
                Outcome::Win(mark) => {
                    assert!(board.lines().any(|line| board.line_owner(line) == Some(mark)));
                }
                Outcome::InProgress => panic!("playout stopped early"),
            }
        }
    }
}

// =============================================================================
// Move application errors
// =============================================================================

#[test]
fn test_occupied_cell_is_rejected_without_change() {
    let mut rng = Rng::with_seed(3);
    for _ in 0..20 {
        let mut board = Board::new(4).unwrap();
        let index = rng.usize(..16);
        board.apply_move(Move::new(index, Mark::X)).unwrap();
        let before = board.clone();
        for mark in Mark::ALL {
            let err = board.apply_move(Move::new(index, mark)).unwrap_err();
            assert_eq!(err, Error::CellOccupied { index, mark: Mark::X });
            assert_eq!(board, before);
        }
    }
}

#[test]
fn test_out_of_range_is_rejected_without_change() {
    let mut board = Board::new(3).unwrap();
    for index in [9, 10, usize::MAX] {
        assert!(matches!(
            board.apply_move(Move::new(index, Mark::O)),
            Err(Error::IndexOutOfRange { cells: 9, .. })
        ));
    }
    assert_eq!(board, Board::new(3).unwrap());
}

// =============================================================================
// Matches
// =============================================================================

#[test]
fn test_engine_match_3x3_is_drawn() {
    let players = [Participant::automated(Mark::X), Participant::automated(Mark::O)];
    let mut game = Game::new(3, players).unwrap();
    while !game.is_over() {
        game.play_automated().unwrap();
    }
    assert_eq!(game.outcome(), Outcome::Draw);
    assert_eq!(game.history().len(), 9);
    assert!(game.winner().is_none());
}

#[test]
fn test_bounded_engine_match_4x4_finishes() {
    let players = [Participant::automated(Mark::X), Participant::automated(Mark::O)];
    let mut game = Game::new(4, players).unwrap().with_depth(Some(2));
    while !game.is_over() {
        let mv = game.play_automated().unwrap();
        assert_eq!(game.board().get(mv.index()).unwrap(), Some(mv.mark()));
    }
    assert!(game.outcome().is_terminal());
}

#[test]
fn test_human_turns_alternate_marks() {
    let config = MatchConfig {
        mode: Mode::Hotseat {
            first: "A".to_string(),
            second: "B".to_string(),
        },
        ..MatchConfig::default()
    };
    let mut game = Game::from_config(&config).unwrap();
    assert_eq!(game.play_at(4).unwrap(), Move::new(4, Mark::X));
    assert_eq!(game.play_at(0).unwrap(), Move::new(0, Mark::O));
    assert_eq!(game.current_player().name(), "A");
}

#[test]
fn test_engine_answers_human_threat() {
    let config = MatchConfig::default();
    let mut game = Game::from_config(&config).unwrap();
    game.play_at(0).unwrap(); // X corner
    game.play_automated().unwrap();
    game.play_at(8).unwrap(); // X opposite corner
    let reply = game.play_automated().unwrap();
    assert_eq!(reply.mark(), Mark::O);
    assert!(!game.is_over());
    // Whatever happens next, the engine cannot lose from here.
    while !game.is_over() {
        if game.current_player().is_automated() {
            game.play_automated().unwrap();
        } else {
            let index = game.board().first_empty_index().unwrap();
            game.play_at(index).unwrap();
        }
    }
    assert_ne!(game.outcome(), Outcome::Win(Mark::X));
}
