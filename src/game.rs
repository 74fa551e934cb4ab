//! Match orchestration and the terminal game loop.
//!
//! [`Game`] owns the live board and the two participants and decides where
//! each move comes from: a freshly built [`SearchEngine`] for automated
//! participants, or the caller for humans. [`TextGame`] drives a `Game`
//! over any line-oriented reader and writer, which is how the binary plays
//! in a terminal and how the tests script whole matches.

use std::io::{BufRead, Write};

use anyhow::{Context, bail};
use tracing::{debug, info, warn};

use crate::board::{Board, Mark, Outcome};
use crate::constants::{DEFAULT_HUMAN_NAME, DEFAULT_SIZE};
use crate::error::{Error, Result};
use crate::moves::{Move, label, parse_label};
use crate::player::Participant;
use crate::search::SearchEngine;

/// Who sits at the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// One human against the engine.
    VsComputer { name: String, human_first: bool },
    /// Two humans taking turns at the same terminal.
    Hotseat { first: String, second: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    pub size: usize,
    /// Requested search depth in plies; see [`MatchConfig::effective_depth`].
    pub depth: Option<usize>,
    pub mode: Mode,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            depth: None,
            mode: Mode::VsComputer {
                name: DEFAULT_HUMAN_NAME.to_string(),
                human_first: true,
            },
        }
    }
}

impl MatchConfig {
    /// The two participants in turn order. The first one plays `X`.
    pub fn participants(&self) -> [Participant; 2] {
        match &self.mode {
            Mode::VsComputer { name, human_first: true } => [
                Participant::human(name.clone(), Mark::X),
                Participant::automated(Mark::O),
            ],
            Mode::VsComputer { name, human_first: false } => [
                Participant::automated(Mark::X),
                Participant::human(name.clone(), Mark::O),
            ],
            Mode::Hotseat { first, second } => [
                Participant::human(first.clone(), Mark::X),
                Participant::human(second.clone(), Mark::O),
            ],
        }
    }

    /// The depth is kept only when `0 < depth <= size * size`; otherwise the
    /// engine searches to the end of the game.
    pub fn effective_depth(&self) -> Option<usize> {
        self.depth
            .filter(|&depth| depth > 0 && depth <= self.size * self.size)
    }
}

/// A match in progress.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    players: [Participant; 2],
    current: usize,
    depth: Option<usize>,
    history: Vec<Move>,
}

impl Game {
    /// New match on an empty `size` board. `players[0]` moves first.
    pub fn new(size: usize, players: [Participant; 2]) -> Result<Self> {
        if players[0].mark() == players[1].mark() {
            return Err(Error::DuplicateMark {
                mark: players[0].mark(),
            });
        }
        Ok(Self {
            board: Board::new(size)?,
            players,
            current: 0,
            depth: None,
            history: Vec::new(),
        })
    }

    pub fn from_config(config: &MatchConfig) -> Result<Self> {
        Ok(Self::new(config.size, config.participants())?.with_depth(config.effective_depth()))
    }

    /// Bound the engine to `depth` plies for every automated move.
    pub fn with_depth(mut self, depth: Option<usize>) -> Self {
        self.depth = depth;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Participant; 2] {
        &self.players
    }

    pub fn current_player(&self) -> &Participant {
        &self.players[self.current]
    }

    pub fn depth(&self) -> Option<usize> {
        self.depth
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn outcome(&self) -> Outcome {
        self.board.evaluate_outcome()
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_terminal()
    }

    pub fn winner(&self) -> Option<&Participant> {
        match self.outcome() {
            Outcome::Win(mark) => self.players.iter().find(|p| p.mark() == mark),
            _ => None,
        }
    }

    /// Place the current participant's mark at `index` and pass the turn.
    pub fn play_at(&mut self, index: usize) -> Result<Move> {
        self.ensure_not_over()?;
        let mv = Move::new(index, self.current_player().mark());
        self.apply(mv)
    }

    /// Let the engine choose and play the current participant's move.
    pub fn play_automated(&mut self) -> Result<Move> {
        self.ensure_not_over()?;
        let mover = self.current_player();
        let engine = match self.depth {
            Some(depth) => SearchEngine::with_depth(&self.board, mover, depth)?,
            None => SearchEngine::new(&self.board, mover)?,
        };
        let mv = engine.best_move()?;
        self.apply(mv)
    }

    fn ensure_not_over(&self) -> Result<()> {
        let outcome = self.outcome();
        if outcome.is_terminal() {
            return Err(Error::GameOver { outcome });
        }
        Ok(())
    }

    fn apply(&mut self, mv: Move) -> Result<Move> {
        self.board.apply_move(mv)?;
        debug!(player = self.current_player().name(), %mv, "move applied");
        self.history.push(mv);
        self.current = 1 - self.current;
        Ok(mv)
    }
}

/// Render the grid with 1-based labels in the empty cells.
pub fn render(board: &Board) -> String {
    let width = label(board.cell_count() - 1).len();
    let mut out = String::new();
    for row in 0..board.size() {
        let cells: Vec<String> = (0..board.size())
            .map(|col| {
                let index = row * board.size() + col;
                match board.get(index) {
                    Ok(Some(mark)) => format!("{mark:>width$}"),
                    _ => format!("{:>width$}", label(index)),
                }
            })
            .collect();
        out.push_str(&cells.join(" | "));
        out.push('\n');
    }
    out
}

/// Line-oriented driver for a [`Game`].
pub struct TextGame<R, W> {
    game: Game,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TextGame<R, W> {
    pub fn new(game: Game, input: R, output: W) -> Self {
        Self {
            game,
            input,
            output,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn into_parts(self) -> (Game, W) {
        (self.game, self.output)
    }

    /// Play until the match ends and announce the result.
    pub fn run(&mut self) -> anyhow::Result<Outcome> {
        writeln!(self.output, "Game Initialized...")?;
        self.print_grid()?;
        for player in self.game.players() {
            writeln!(self.output, "{} {}", player.name(), player.mark())?;
        }
        info!(
            size = self.game.board().size(),
            depth = ?self.game.depth(),
            "match started"
        );

        while !self.game.is_over() {
            self.take_turn()?;
            writeln!(self.output, "Grid updated...")?;
            self.print_grid()?;
        }

        let outcome = self.game.outcome();
        match self.game.winner() {
            Some(winner) => writeln!(self.output, "{}({}) won!", winner.name(), winner.kind())?,
            None => writeln!(self.output, "Game drawn!")?,
        }
        self.output.flush()?;
        info!(%outcome, moves = self.game.history().len(), "match finished");
        Ok(outcome)
    }

    fn take_turn(&mut self) -> anyhow::Result<()> {
        if self.game.current_player().is_automated() {
            self.game
                .play_automated()
                .context("engine failed to choose a move")?;
        } else {
            let index = self.prompt_index()?;
            self.game.play_at(index)?;
        }
        Ok(())
    }

    /// Ask the current human for a cell until they name an empty one.
    fn prompt_index(&mut self) -> anyhow::Result<usize> {
        let cells = self.game.board().cell_count();
        let name = self.game.current_player().name().to_string();
        loop {
            writeln!(
                self.output,
                "Enter the index of the box you want to sign, {name}:"
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line).context("failed to read move")? == 0 {
                bail!("input closed before {name} chose a move");
            }

            let index = match parse_label(&line, cells) {
                Ok(index) => index,
                Err(err) => {
                    warn!(%err, "rejected move");
                    writeln!(
                        self.output,
                        "Please enter valid values for index (1-{cells})."
                    )?;
                    continue;
                }
            };
            if !self.game.board().is_empty_at(index)? {
                warn!(index, "rejected move onto occupied cell");
                writeln!(self.output, "Please enter the index of an empty box.")?;
                continue;
            }
            return Ok(index);
        }
    }

    fn print_grid(&mut self) -> anyhow::Result<()> {
        write!(self.output, "{}", render(self.game.board()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::player::Kind;

    fn run_script(config: &MatchConfig, script: &str) -> (anyhow::Result<Outcome>, Game, String) {
        let game = Game::from_config(config).unwrap();
        let mut text = TextGame::new(game, Cursor::new(script.to_string()), Vec::new());
        let result = text.run();
        let (game, output) = text.into_parts();
        (result, game, String::from_utf8(output).unwrap())
    }

    fn hotseat() -> MatchConfig {
        MatchConfig {
            mode: Mode::Hotseat {
                first: "Alice".to_string(),
                second: "Bob".to_string(),
            },
            ..MatchConfig::default()
        }
    }

    #[test]
    fn test_participants_by_mode() {
        let [first, second] = MatchConfig::default().participants();
        assert_eq!(first.kind(), Kind::Human);
        assert_eq!(first.mark(), Mark::X);
        assert!(second.is_automated());

        let config = MatchConfig {
            mode: Mode::VsComputer {
                name: "Ann".to_string(),
                human_first: false,
            },
            ..MatchConfig::default()
        };
        let [first, second] = config.participants();
        assert!(first.is_automated());
        assert_eq!(first.mark(), Mark::X);
        assert_eq!(second.name(), "Ann");
    }

    #[test]
    fn test_effective_depth() {
        let mut config = MatchConfig::default();
        assert_eq!(config.effective_depth(), None);
        config.depth = Some(0);
        assert_eq!(config.effective_depth(), None);
        config.depth = Some(10);
        assert_eq!(config.effective_depth(), None);
        config.depth = Some(4);
        assert_eq!(config.effective_depth(), Some(4));
    }

    #[test]
    fn test_duplicate_marks_rejected() {
        let players = [
            Participant::human("a", Mark::X),
            Participant::human("b", Mark::X),
        ];
        assert_eq!(
            Game::new(3, players).unwrap_err(),
            Error::DuplicateMark { mark: Mark::X }
        );
    }

    #[test]
    fn test_play_after_game_over() {
        let mut game = Game::from_config(&hotseat()).unwrap();
        for index in [0, 3, 1, 4, 2] {
            game.play_at(index).unwrap();
        }
        assert_eq!(game.outcome(), Outcome::Win(Mark::X));
        assert_eq!(game.winner().unwrap().name(), "Alice");
        assert!(matches!(game.play_at(8), Err(Error::GameOver { .. })));
    }

    #[test]
    fn test_failed_move_keeps_turn() {
        let mut game = Game::from_config(&hotseat()).unwrap();
        game.play_at(4).unwrap();
        assert!(game.play_at(4).is_err());
        assert_eq!(game.current_player().name(), "Bob");
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_hotseat_script_win() {
        let (result, game, output) = run_script(&hotseat(), "1\n4\n2\n5\n3\n");
        assert_eq!(result.unwrap(), Outcome::Win(Mark::X));
        assert_eq!(game.history().len(), 5);
        assert!(output.starts_with("Game Initialized..."));
        assert!(output.contains("Alice X\nBob O\n"));
        assert!(output.ends_with("Alice(User) won!\n"));
    }

    #[test]
    fn test_bad_input_reprompts() {
        let (result, _, output) = run_script(&hotseat(), "0\nabc\n5\n5\n1\n2\n4\n3\n7\n");
        assert_eq!(result.unwrap(), Outcome::Win(Mark::O));
        assert_eq!(output.matches("Please enter valid values for index (1-9).").count(), 2);
        assert_eq!(output.matches("Please enter the index of an empty box.").count(), 1);
        assert!(output.ends_with("Bob(User) won!\n"));
    }

    #[test]
    fn test_draw_announced() {
        // X: 1 2 6 7 9, O: 3 4 5 8
        let (result, _, output) = run_script(&hotseat(), "1\n3\n2\n4\n6\n5\n7\n8\n9\n");
        assert_eq!(result.unwrap(), Outcome::Draw);
        assert!(output.ends_with("Game drawn!\n"));
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let (result, _, _) = run_script(&hotseat(), "1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_engine_never_loses_to_scripted_human() {
        let script = "1\n2\n3\n4\n5\n6\n7\n8\n9\n".repeat(5);
        for human_first in [true, false] {
            let config = MatchConfig {
                mode: Mode::VsComputer {
                    name: "Tester".to_string(),
                    human_first,
                },
                ..MatchConfig::default()
            };
            let (result, game, _) = run_script(&config, &script);
            let outcome = result.unwrap();
            assert!(outcome.is_terminal());
            assert!(game.winner().is_none_or(|p| p.is_automated()));
        }
    }

    #[test]
    fn test_render_labels_empty_cells() {
        let board: Board = "X.. .O. ...".parse().unwrap();
        assert_eq!(render(&board), "X | 2 | 3\n4 | O | 6\n7 | 8 | 9\n");
        let big = Board::new(4).unwrap();
        assert!(render(&big).starts_with(" 1 |  2 |  3 |  4\n"));
    }
}
