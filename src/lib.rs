//! Tictac-Rust: N x N tic-tac-toe with a minimax engine.
//!
//! The board generalizes win and draw detection from the classic 3x3 grid to
//! any square grid, and the search engine picks moves for an automated
//! participant by exhaustive or depth-bounded negamax.
//!
//! ## Modules
//!
//! - [`constants`] - Default sizes, score scale, and player names
//! - [`error`] - Error type shared by the board, engine, and match driver
//! - [`board`] - Board state, winning lines, and outcome detection
//! - [`moves`] - Move values and 1-based cell labels
//! - [`player`] - Participants and their kinds
//! - [`search`] - Negamax search with alpha-beta pruning
//! - [`playout`] - Random movers and engine-versus-random matches
//! - [`game`] - Match orchestration and the terminal game loop
//!
//! ## Example
//!
//! ```
//! use tictac_rust::board::{Board, Mark, Outcome};
//! use tictac_rust::player::Participant;
//! use tictac_rust::search::SearchEngine;
//!
//! // X threatens the top row; O must block at index 2.
//! let board: Board = "XX. .O. ...".parse().unwrap();
//! let ai = Participant::automated(Mark::O);
//! let engine = SearchEngine::new(&board, &ai).unwrap();
//! let best = engine.best_move().unwrap();
//! assert_eq!(best.index(), 2);
//!
//! let next = board.with_move(best).unwrap();
//! assert_eq!(next.evaluate_outcome(), Outcome::InProgress);
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod moves;
pub mod player;
pub mod playout;
pub mod search;

pub use error::{Error, Result};
