//! Move values and the 1-based cell labels shown to human players.

use std::fmt;

use crate::board::Mark;
use crate::error::{Error, Result};

/// "Place `mark` at cell `index`".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    index: usize,
    mark: Mark,
}

impl Move {
    pub fn new(index: usize, mark: Mark) -> Self {
        Self { index, mark }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.mark, label(self.index))
    }
}

/// Parse a 1-based cell label into a 0-based index on a board of `cells` cells.
pub fn parse_label(s: &str, cells: usize) -> Result<usize> {
    let s = s.trim();
    match s.parse::<usize>() {
        Ok(n) if (1..=cells).contains(&n) => Ok(n - 1),
        _ => Err(Error::InvalidLabel {
            label: s.to_string(),
            cells,
        }),
    }
}

/// Format a 0-based index as its 1-based label.
pub fn label(index: usize) -> String {
    (index + 1).to_string()
}
