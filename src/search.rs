//! Adversarial game-tree search.
//!
//! The engine runs negamax with fail-soft alpha-beta pruning over an owned
//! snapshot of the board. Every empty cell is a candidate at every ply and
//! candidates are tried in ascending index order; the root only replaces its
//! best move on a strictly better score, so ties go to the lowest index.
//!
//! Scores are from the point of view of the side to move:
//! - a win found `p` plies below the root is `WIN_SCORE - p`
//! - a loss is the negation, a draw is `DRAW_SCORE`
//! - a non-terminal leaf at the depth bound gets [`heuristic`]

use tracing::{debug, instrument, trace};

use crate::board::{Board, Mark, Outcome};
use crate::constants::{DRAW_SCORE, HEURISTIC_LIMIT, SCORE_INF, WIN_SCORE};
use crate::error::{Error, Result};
use crate::moves::Move;
use crate::player::Participant;

pub type Score = i64;

/// Result of a root search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub best: Move,
    pub score: Score,
    /// Positions visited, root children included.
    pub nodes: u64,
}

/// Chooses a move for one participant on one board snapshot.
///
/// Build a fresh engine for every decision; it never sees later changes to
/// the caller's board.
#[derive(Clone, Debug)]
pub struct SearchEngine {
    board: Board,
    mover: Mark,
    max_depth: Option<usize>,
}

impl SearchEngine {
    /// Engine that searches to the end of the game.
    pub fn new(board: &Board, mover: &Participant) -> Result<Self> {
        Self::build(board, mover, None)
    }

    /// Engine bounded to `max_depth` plies.
    ///
    /// A bound of 0, or one larger than the number of empty cells, falls back
    /// to exhaustive search.
    pub fn with_depth(board: &Board, mover: &Participant, max_depth: usize) -> Result<Self> {
        let empty = board.empty_count();
        let bound = (max_depth > 0 && max_depth <= empty).then_some(max_depth);
        if bound.is_none() {
            debug!(max_depth, empty, "depth bound ignored, searching to game end");
        }
        Self::build(board, mover, bound)
    }

    fn build(board: &Board, mover: &Participant, max_depth: Option<usize>) -> Result<Self> {
        let mark = mover.mark();
        if !board.next_marks().contains(&mark) {
            return Err(Error::InvalidMover {
                mark,
                x_count: board.count(Mark::X),
                o_count: board.count(Mark::O),
            });
        }
        Ok(Self {
            board: board.clone(),
            mover: mark,
            max_depth,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mover(&self) -> Mark {
        self.mover
    }

    /// Effective ply bound; `None` means search to the end of the game.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// The move judged best for the mover.
    pub fn best_move(&self) -> Result<Move> {
        self.search().map(|report| report.best)
    }

    #[instrument(level = "debug", skip(self), fields(mover = %self.mover, depth = ?self.max_depth))]
    pub fn search(&self) -> Result<SearchReport> {
        self.ensure_playable()?;

        let mut scratch = self.board.clone();
        let mut nodes = 0;
        let mut alpha = -SCORE_INF;
        let mut best: Option<(usize, Score)> = None;

        let candidates: Vec<usize> = self.board.empty_indices().collect();
        for index in candidates {
            scratch.place(index, self.mover);
            let score = -self.negamax(
                &mut scratch,
                self.mover.opponent(),
                1,
                -SCORE_INF,
                -alpha,
                &mut nodes,
            );
            scratch.clear(index);

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((index, score));
                alpha = alpha.max(score);
            }
        }

        let (index, score) = best.ok_or_else(|| Error::NoLegalMove {
            outcome: self.board.evaluate_outcome(),
        })?;
        let best = Move::new(index, self.mover);
        debug!(%best, score, nodes, "search finished");
        Ok(SearchReport { best, score, nodes })
    }

    /// Exact score of every legal root move, in ascending index order.
    ///
    /// Each move gets a full window, so this visits more of the tree than
    /// [`SearchEngine::search`].
    pub fn root_scores(&self) -> Result<Vec<(Move, Score)>> {
        self.ensure_playable()?;

        let mut scratch = self.board.clone();
        let mut nodes = 0;
        let candidates: Vec<usize> = self.board.empty_indices().collect();
        let mut scores = Vec::with_capacity(candidates.len());
        for index in candidates {
            scratch.place(index, self.mover);
            let score = -self.negamax(
                &mut scratch,
                self.mover.opponent(),
                1,
                -SCORE_INF,
                SCORE_INF,
                &mut nodes,
            );
            scratch.clear(index);
            trace!(index, score, "root move");
            scores.push((Move::new(index, self.mover), score));
        }
        Ok(scores)
    }

    fn ensure_playable(&self) -> Result<()> {
        let outcome = self.board.evaluate_outcome();
        if outcome.is_terminal() {
            return Err(Error::NoLegalMove { outcome });
        }
        Ok(())
    }

    /// Score of `board` for `to_move`, `ply` half-moves below the root.
    fn negamax(
        &self,
        board: &mut Board,
        to_move: Mark,
        ply: usize,
        mut alpha: Score,
        beta: Score,
        nodes: &mut u64,
    ) -> Score {
        *nodes += 1;

        match board.evaluate_outcome() {
            Outcome::Win(mark) => {
                let score = WIN_SCORE - ply as Score;
                return if mark == to_move { score } else { -score };
            }
            Outcome::Draw => return DRAW_SCORE,
            Outcome::InProgress => {}
        }

        if self.max_depth.is_some_and(|depth| ply >= depth) {
            return heuristic(board, to_move);
        }

        let mut best = -SCORE_INF;
        let candidates: Vec<usize> = board.empty_indices().collect();
        for index in candidates {
            board.place(index, to_move);
            let score = -self.negamax(board, to_move.opponent(), ply + 1, -beta, -alpha, nodes);
            board.clear(index);

            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

/// Static evaluation of a non-terminal board for `mark`.
///
/// Every line holding only `mark` adds `k * k` for its `k` marks, every line
/// holding only the opponent's marks subtracts the same. Blocked and empty
/// lines count for nothing. The result stays within `±HEURISTIC_LIMIT`.
pub fn heuristic(board: &Board, mark: Mark) -> Score {
    let opponent = mark.opponent();
    let mut score: Score = 0;
    for line in board.lines() {
        let own = board.count_in_line(line, mark) as Score;
        let theirs = board.count_in_line(line, opponent) as Score;
        match (own, theirs) {
            (k, 0) => score += k * k,
            (0, k) => score -= k * k,
            _ => {}
        }
    }
    score.clamp(-HEURISTIC_LIMIT, HEURISTIC_LIMIT)
}
