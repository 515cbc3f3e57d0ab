//! Game session management and the square-based entry points used by shells.
//!
//! [`Game`] owns the current [`GameState`] of one game and refuses moves once
//! it has ended. The free functions [`create_initial_state`],
//! [`generate_legal_destinations`] and [`try_apply_move`] offer the same
//! operations statelessly, in terms of the squares a user selects.

use crate::movegen::MoveList;
use crate::rules::{GameResult, MoveError, RuleSet, StandardChess};
use crate::GameState;
use chess_core::{Move, PieceKind, Position};
use thiserror::Error;
use tracing::{debug, trace};

/// Error type for game operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    /// The text could not be read as a coordinate move.
    #[error("invalid move notation: {0:?}")]
    InvalidNotation(String),

    /// The move was refused by the rules.
    #[error("illegal move: {0}")]
    Move(#[from] MoveError),
}

/// Returns the standard starting state.
pub fn create_initial_state() -> GameState {
    StandardChess.initial_state()
}

/// Returns the squares the piece on `from` can legally move to.
///
/// Each square appears once, even when several promotions lead there. Empty
/// if `from` is off the board, empty, or holds a piece of the side not on
/// move.
pub fn generate_legal_destinations(state: &GameState, from: Position) -> Vec<Position> {
    let mut destinations: Vec<Position> = StandardChess
        .legal_moves_from(state, from)
        .as_slice()
        .iter()
        .map(|m| m.to)
        .collect();
    destinations.sort();
    destinations.dedup();
    destinations
}

/// Validates and plays the move from `from` to `to`.
///
/// `promote_to` must be given exactly when a pawn reaches the last row. On
/// failure `state` is untouched and the error says why.
pub fn try_apply_move(
    state: &GameState,
    from: Position,
    to: Position,
    promote_to: Option<PieceKind>,
) -> Result<GameState, MoveError> {
    if state.is_terminal() {
        return Err(MoveError::GameOver);
    }
    let request = StandardChess.move_request(state, from, to, promote_to)?;
    StandardChess.try_apply_move(state, request)
}

/// Parses coordinate notation such as `e2e4`, `e2 e4` or `e7e8q`.
///
/// Returns the origin, destination and optional promotion piece.
pub fn parse_coordinate_move(
    text: &str,
) -> Result<(Position, Position, Option<PieceKind>), GameError> {
    let invalid = || GameError::InvalidNotation(text.to_string());
    let compact: String = text.split_whitespace().collect();
    if !compact.is_ascii() || !(4..=5).contains(&compact.len()) {
        return Err(invalid());
    }

    let from: Position = compact[0..2].parse().map_err(|_| invalid())?;
    let to: Position = compact[2..4].parse().map_err(|_| invalid())?;
    let promote_to = match compact[4..].chars().next() {
        Some(c) => Some(PieceKind::from_char(c).ok_or_else(invalid)?),
        None => None,
    };

    Ok((from, to, promote_to))
}

/// One game in progress.
///
/// `Game` holds the current state and replaces it with each accepted move.
/// Once checkmate or stalemate is reached every further move is refused with
/// [`MoveError::GameOver`] until [`Game::new_game`] is called.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Game {
            state: create_initial_state(),
        }
    }

    /// Creates a game continuing from `state`.
    pub fn from_state(state: GameState) -> Self {
        Game { state }
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns all legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        StandardChess.legal_moves(&self.state)
    }

    /// Returns the legal destinations of the piece on `from`.
    pub fn legal_destinations(&self, from: Position) -> Vec<Position> {
        generate_legal_destinations(&self.state, from)
    }

    pub fn is_check(&self) -> bool {
        self.state.is_check()
    }

    /// Returns the result if the game has ended.
    pub fn result(&self) -> Option<GameResult> {
        self.state.result()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn move_history(&self) -> &[Move] {
        self.state.move_history()
    }

    /// Returns the number of half-moves played.
    pub fn ply_count(&self) -> usize {
        self.state.move_history().len()
    }

    /// Makes a fully specified move.
    pub fn make_move(&mut self, m: Move) -> Result<(), GameError> {
        self.ensure_in_progress()?;
        let next = StandardChess.try_apply_move(&self.state, m).map_err(|e| {
            debug!(mv = %m, error = %e, "move rejected");
            e
        })?;
        self.commit(next);
        Ok(())
    }

    /// Makes a move given by its squares.
    pub fn play(
        &mut self,
        from: Position,
        to: Position,
        promote_to: Option<PieceKind>,
    ) -> Result<(), GameError> {
        self.ensure_in_progress()?;
        let next = try_apply_move(&self.state, from, to, promote_to).map_err(|e| {
            debug!(%from, %to, error = %e, "move rejected");
            e
        })?;
        self.commit(next);
        Ok(())
    }

    /// Makes a move given in coordinate notation (`e2e4`, `e7e8q`).
    pub fn make_move_uci(&mut self, text: &str) -> Result<(), GameError> {
        let (from, to, promote_to) = parse_coordinate_move(text)?;
        self.play(from, to, promote_to)
    }

    /// Abandons the current game and starts again from the initial position.
    pub fn new_game(&mut self) {
        debug!(plies = self.ply_count(), "starting new game");
        self.state = create_initial_state();
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        if self.state.is_terminal() {
            debug!("move refused, game is over");
            return Err(MoveError::GameOver.into());
        }
        Ok(())
    }

    fn commit(&mut self, next: GameState) {
        if let Some(m) = next.last_move() {
            trace!(mv = %m, check = next.is_check(), "move played");
        }
        if let Some(result) = next.result() {
            debug!(%result, plies = next.move_history().len(), "game over");
        }
        self.state = next;
    }
}
