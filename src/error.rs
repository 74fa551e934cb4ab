//! Error types for the board, search engine, and match driver.

use thiserror::Error;

use crate::board::{Mark, Outcome};

/// Errors surfaced by the core. All of them are caller-contract violations;
/// nothing here is retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board size {size} (must be at least 1)")]
    InvalidSize { size: usize },

    #[error("cell {index} is out of range (board has {cells} cells)")]
    IndexOutOfRange { index: usize, cells: usize },

    #[error("cell {index} is already occupied by {mark}")]
    CellOccupied { index: usize, mark: Mark },

    #[error("{mark} cannot move next on this board (X={x_count}, O={o_count})")]
    InvalidMover {
        mark: Mark,
        x_count: usize,
        o_count: usize,
    },

    #[error("no legal move available: {outcome}")]
    NoLegalMove { outcome: Outcome },

    #[error("board string has {got} cells, which is not a square grid")]
    InvalidBoardLength { got: usize },

    #[error("invalid character '{character}' at position {position}")]
    InvalidCellCharacter { character: char, position: usize },

    #[error("invalid cell label '{label}' (expected 1-{cells})")]
    InvalidLabel { label: String, cells: usize },

    #[error("both participants use mark {mark}")]
    DuplicateMark { mark: Mark },

    #[error("game already over: {outcome}")]
    GameOver { outcome: Outcome },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
