//! N x N board representation and win/draw detection.
//!
//! Cells are stored row-major in a flat vector: index `i` is row `i / n`,
//! column `i % n`. Winning lines are the `n` rows, the `n` columns and the
//! two main diagonals, all derived arithmetically from `n`.

use std::fmt;
use std::str::FromStr;

use crate::constants::{EMPTY_CHARS, MIN_SIZE};
use crate::error::{Error, Result};
use crate::moves::Move;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub const ALL: [Mark; 2] = [Mark::X, Mark::O];

    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => f.pad("X"),
            Mark::O => f.pad("O"),
        }
    }
}

/// Cell state: `None` is empty.
pub type Cell = Option<Mark>;

/// State of a match, derived from the board alone.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win(Mark),
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::Win(mark) => write!(f, "{mark} wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// One of the `2n + 2` lines that can win a match.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Line {
    Row(usize),
    Column(usize),
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Line {
    /// Cell indices along this line on a board of side `size`.
    pub fn indices(self, size: usize) -> impl Iterator<Item = usize> {
        (0..size).map(move |i| match self {
            Line::Row(r) => r * size + i,
            Line::Column(c) => i * size + c,
            Line::Diagonal => i * size + i,
            Line::AntiDiagonal => i * size + (size - 1 - i),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board of side `size`.
    pub fn new(size: usize) -> Result<Self> {
        if size < MIN_SIZE {
            return Err(Error::InvalidSize { size });
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.cells.len() {
            return Err(Error::IndexOutOfRange {
                index,
                cells: self.cells.len(),
            });
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<Cell> {
        self.check_index(index)?;
        Ok(self.cells[index])
    }

    pub fn is_empty_at(&self, index: usize) -> Result<bool> {
        Ok(self.get(index)?.is_none())
    }

    /// Lowest empty index, or `None` when the board is full.
    pub fn first_empty_index(&self) -> Option<usize> {
        self.cells.iter().position(Option::is_none)
    }

    /// Empty cell indices in ascending order.
    pub fn empty_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| i)
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == Some(mark)).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Place `mv` on the board. On error the board is left unchanged.
    pub fn apply_move(&mut self, mv: Move) -> Result<()> {
        let index = mv.index();
        if let Some(mark) = self.get(index)? {
            return Err(Error::CellOccupied { index, mark });
        }
        self.cells[index] = Some(mv.mark());
        Ok(())
    }

    /// Copy of this board with `mv` applied.
    pub fn with_move(&self, mv: Move) -> Result<Board> {
        let mut next = self.clone();
        next.apply_move(mv)?;
        Ok(next)
    }

    /// Unchecked placement for search scratch boards. `index` must be empty and in range.
    pub(crate) fn place(&mut self, index: usize, mark: Mark) {
        debug_assert!(self.cells[index].is_none());
        self.cells[index] = Some(mark);
    }

    pub(crate) fn clear(&mut self, index: usize) {
        self.cells[index] = None;
    }

    /// All winning lines: rows, then columns, then the two diagonals.
    pub fn lines(&self) -> impl Iterator<Item = Line> + use<> {
        let n = self.size;
        (0..n)
            .map(Line::Row)
            .chain((0..n).map(Line::Column))
            .chain([Line::Diagonal, Line::AntiDiagonal])
    }

    /// Number of cells on `line` holding `mark`.
    pub fn count_in_line(&self, line: Line, mark: Mark) -> usize {
        line.indices(self.size)
            .filter(|&i| self.cells[i] == Some(mark))
            .count()
    }

    /// The mark filling every cell of `line`, if any.
    pub fn line_owner(&self, line: Line) -> Option<Mark> {
        let mut indices = line.indices(self.size);
        let first = self.cells[indices.next()?]?;
        indices
            .all(|i| self.cells[i] == Some(first))
            .then_some(first)
    }

    pub fn evaluate_outcome(&self) -> Outcome {
        // Two different winners cannot arise from alternating play; the first
        // complete line found is reported.
        if let Some(mark) = self.lines().find_map(|line| self.line_owner(line)) {
            return Outcome::Win(mark);
        }
        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    /// Marks that may legally move next, judged from the mark counts.
    ///
    /// With equal counts either mark may move (whoever opened). A board whose
    /// counts differ by more than one has no legal next mark.
    pub fn next_marks(&self) -> &'static [Mark] {
        let x = self.count(Mark::X);
        let o = self.count(Mark::O);
        if x == o {
            &Mark::ALL
        } else if x == o + 1 {
            &[Mark::O]
        } else if o == x + 1 {
            &[Mark::X]
        } else {
            &[]
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            for (col, cell) in row.iter().enumerate() {
                let ch = match cell {
                    Some(Mark::X) => 'X',
                    Some(Mark::O) => 'O',
                    None => '.',
                };
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parse a board such as `"XO. .X. ..O"`. Whitespace is ignored.
    fn from_str(s: &str) -> Result<Self> {
        let mut cells = Vec::new();
        for (position, character) in s.chars().filter(|c| !c.is_whitespace()).enumerate() {
            let cell = match character.to_ascii_uppercase() {
                'X' => Some(Mark::X),
                'O' => Some(Mark::O),
                c if EMPTY_CHARS.contains(&c) => None,
                _ => {
                    return Err(Error::InvalidCellCharacter {
                        character,
                        position,
                    });
                }
            };
            cells.push(cell);
        }

        let size = cells.len().isqrt();
        if size < MIN_SIZE || size * size != cells.len() {
            return Err(Error::InvalidBoardLength { got: cells.len() });
        }
        Ok(Self { size, cells })
    }
}
