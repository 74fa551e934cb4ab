//! Constants for board dimensions, search scoring, and match defaults.
//!
//! Board geometry is chosen at runtime (any side `n >= 1`), so this module
//! only carries the defaults used when the caller does not choose one, plus
//! the score scale shared by the search engine and its leaf heuristic.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board side (the classic 3x3 grid).
pub const DEFAULT_SIZE: usize = 3;

/// Smallest legal board side.
pub const MIN_SIZE: usize = 1;

/// Characters accepted as an empty cell when parsing a board.
pub const EMPTY_CHARS: [char; 3] = ['.', '-', '_'];

// =============================================================================
// Search Scoring
// =============================================================================

/// Score of a win found at the root. A win `p` plies deep scores `WIN_SCORE - p`.
pub const WIN_SCORE: i64 = 1 << 40;

/// Score of a drawn terminal position.
pub const DRAW_SCORE: i64 = 0;

/// Upper bound on the magnitude of a depth-limit heuristic score.
///
/// Kept far below `WIN_SCORE - cells` for any board that fits in memory, so
/// a real terminal result always outranks a heuristic guess.
pub const HEURISTIC_LIMIT: i64 = 1 << 30;

/// Bound used as "infinity" by the alpha-beta window.
pub const SCORE_INF: i64 = WIN_SCORE + 1;

// =============================================================================
// Participants
// =============================================================================

/// Display name given to automated participants.
pub const AI_NAME: &str = "AI";

/// Display name used for a human participant when none is supplied.
pub const DEFAULT_HUMAN_NAME: &str = "UserPlayer";

// =============================================================================
// Self-play
// =============================================================================

/// Number of games played by the `selfplay` command by default.
pub const DEFAULT_SELFPLAY_GAMES: usize = 50;

/// Seed for the random opponent used by `selfplay`.
pub const DEFAULT_SEED: u64 = 42;
