//! Line-oriented command handling for the terminal shell.

use crate::config::PlayConfig;
use chess_core::{Piece, Position};
use chess_engine::{Game, GameError, GameResult, MoveError};
use std::io::{self, Write};

/// What the input loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

const HELP: &str = "\
commands:
  e2e4 | e2 e4   move a piece (append q/r/b/n to promote, e.g. e7e8q)
  moves e2       list the legal destinations of the piece on e2
  new            start a new game
  help           show this text
  quit           leave";

/// One interactive session: a game plus the display preferences.
pub struct Shell {
    game: Game,
    config: PlayConfig,
}

impl Shell {
    pub fn new(config: PlayConfig) -> Self {
        Shell {
            game: Game::new(),
            config,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Prints the board and the status line.
    pub fn show(&self, out: &mut impl Write) -> io::Result<()> {
        let board = self.game.state().board();
        let diagram = if self.config.unicode_pieces {
            board.render(Piece::glyph)
        } else {
            board.render(Piece::to_char)
        };
        writeln!(out, "{}", diagram)?;
        writeln!(out, "{}", self.status())
    }

    /// Describes whose turn it is, or how the game ended.
    pub fn status(&self) -> String {
        let state = self.game.state();
        match state.result() {
            Some(GameResult::Checkmate { winner }) => format!("Checkmate. {} wins.", winner),
            Some(GameResult::Stalemate) => "Stalemate.".to_string(),
            None if state.is_check() => format!("{} to move, in check.", state.current_player()),
            None => format!("{} to move.", state.current_player()),
        }
    }

    /// Handles one input line.
    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let line = line.trim();
        let mut words = line.split_whitespace();

        match words.next() {
            None => {}
            Some("quit" | "exit") => return Ok(Flow::Quit),
            Some("help") => writeln!(out, "{}", HELP)?,
            Some("new") => {
                self.game.new_game();
                self.show(out)?;
            }
            Some("moves") => match words.next().map(str::parse::<Position>) {
                Some(Ok(from)) => self.list_destinations(from, out)?,
                Some(Err(e)) => writeln!(out, "{}", e)?,
                None => writeln!(out, "usage: moves <square>")?,
            },
            Some(_) => self.try_move(line, out)?,
        }

        Ok(Flow::Continue)
    }

    fn list_destinations(&self, from: Position, out: &mut impl Write) -> io::Result<()> {
        let destinations = self.game.legal_destinations(from);
        if destinations.is_empty() {
            return writeln!(out, "{}: no legal moves", from);
        }
        let names: Vec<String> = destinations.iter().map(|sq| sq.to_algebraic()).collect();
        writeln!(out, "{}: {}", from, names.join(" "))
    }

    fn try_move(&mut self, text: &str, out: &mut impl Write) -> io::Result<()> {
        match self.game.make_move_uci(text) {
            Ok(()) => self.show(out),
            Err(e) => {
                writeln!(out, "{}", e)?;
                if self.config.show_destinations {
                    if let Some(from) = rejected_origin(&e, text) {
                        self.list_destinations(from, out)?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// The origin square worth hinting at after a rejected move, if any.
fn rejected_origin(error: &GameError, text: &str) -> Option<Position> {
    match error {
        GameError::Move(
            MoveError::Unreachable { .. }
            | MoveError::LeavesKingInCheck
            | MoveError::PromotionRequired
            | MoveError::InvalidPromotion(_),
        ) => chess_engine::parse_coordinate_move(text)
            .ok()
            .map(|(from, _, _)| from),
        _ => None,
    }
}
