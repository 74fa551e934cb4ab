//! Random playouts and engine-versus-random matches.
//!
//! A random mover picks uniformly among the empty cells. Pitting the search
//! engine against it is a cheap strength check: an exhaustive engine must
//! never lose.

use fastrand::Rng;
use tracing::{debug, info};

use crate::board::{Board, Mark, Outcome};
use crate::error::Result;
use crate::moves::Move;
use crate::player::Participant;
use crate::search::SearchEngine;

/// Pick a uniformly random empty cell, or `None` if the board is full.
pub fn random_move(board: &Board, rng: &mut Rng) -> Option<usize> {
    let empty = board.empty_count();
    if empty == 0 {
        return None;
    }
    board.empty_indices().nth(rng.usize(..empty))
}

/// Play random moves, starting with `to_move`, until the game ends.
pub fn random_playout(board: &mut Board, mut to_move: Mark, rng: &mut Rng) -> Result<Outcome> {
    loop {
        let outcome = board.evaluate_outcome();
        if outcome.is_terminal() {
            return Ok(outcome);
        }
        let Some(index) = random_move(board, rng) else {
            return Ok(outcome);
        };
        board.apply_move(Move::new(index, to_move))?;
        to_move = to_move.opponent();
    }
}

/// Results of a series of engine-versus-random games.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub engine_wins: usize,
    pub random_wins: usize,
    pub draws: usize,
}

impl Tally {
    pub fn games(&self) -> usize {
        self.engine_wins + self.random_wins + self.draws
    }
}

/// Play `games` games on a `size` board between the engine and a random
/// mover. The engine opens the even-numbered games.
pub fn versus_random(size: usize, depth: Option<usize>, games: usize, seed: u64) -> Result<Tally> {
    let mut rng = Rng::with_seed(seed);
    let mut tally = Tally::default();

    for game in 0..games {
        let engine_mark = if game % 2 == 0 { Mark::X } else { Mark::O };
        let engine = Participant::automated(engine_mark);
        let mut board = Board::new(size)?;
        let mut to_move = Mark::X;

        let outcome = loop {
            let outcome = board.evaluate_outcome();
            if outcome.is_terminal() {
                break outcome;
            }
            let mv = if to_move == engine_mark {
                let search = match depth {
                    Some(depth) => SearchEngine::with_depth(&board, &engine, depth)?,
                    None => SearchEngine::new(&board, &engine)?,
                };
                search.best_move()?
            } else {
                match random_move(&board, &mut rng) {
                    Some(index) => Move::new(index, to_move),
                    None => break outcome,
                }
            };
            board.apply_move(mv)?;
            to_move = to_move.opponent();
        };

        debug!(game, %engine_mark, %outcome, "selfplay game finished");
        match outcome {
            Outcome::Win(mark) if mark == engine_mark => tally.engine_wins += 1,
            Outcome::Win(_) => tally.random_wins += 1,
            _ => tally.draws += 1,
        }
    }

    info!(?tally, "selfplay finished");
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_move_is_empty_cell() {
        let mut rng = Rng::with_seed(7);
        let board: Board = "XO. .X. O..".parse().unwrap();
        for _ in 0..50 {
            let index = random_move(&board, &mut rng).unwrap();
            assert!(board.is_empty_at(index).unwrap());
        }
    }

    #[test]
    fn test_random_move_full_board() {
        let mut rng = Rng::with_seed(7);
        let board: Board = "XOX XOO OXX".parse().unwrap();
        assert_eq!(random_move(&board, &mut rng), None);
    }

    #[test]
    fn test_random_playout_terminates() {
        let mut rng = Rng::with_seed(1);
        for n in 1..=5 {
            let mut board = Board::new(n).unwrap();
            let outcome = random_playout(&mut board, Mark::X, &mut rng).unwrap();
            assert!(outcome.is_terminal());
            assert_eq!(board.evaluate_outcome(), outcome);
        }
    }

    #[test]
    fn test_tally_counts_every_game() {
        let tally = versus_random(3, Some(2), 6, 3).unwrap();
        assert_eq!(tally.games(), 6);
    }
}
