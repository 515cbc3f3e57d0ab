//! Rule set abstraction.
//!
//! This module provides the [`RuleSet`] trait, which separates the rules of
//! the game from the state they operate on, and the [`MoveError`] taxonomy
//! used to explain why a move was refused.

mod standard;

pub(crate) use standard::{advance, has_legal_move};
pub use standard::StandardChess;

use crate::movegen::MoveList;
use crate::GameState;
use chess_core::{Color, Move, Piece, PieceKind, Position};
use thiserror::Error;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    /// The side to move is checkmated; `winner` delivered the mate.
    Checkmate { winner: Color },
    /// The side to move has no legal moves but is not in check.
    Stalemate,
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameResult::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// Why a move was refused.
///
/// Refusing a move never changes the state it was checked against.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MoveError {
    /// A coordinate lies outside the board.
    #[error("square {0:?} is off the board")]
    OffBoard(Position),

    /// There is no piece on the origin square.
    #[error("no piece on {0}")]
    NoPiece(Position),

    /// The piece on the origin square belongs to the side not on move.
    #[error("it is not {color}'s turn")]
    WrongTurn { color: Color },

    /// The move names a different piece than the one on the origin square.
    #[error("expected {actual} on the origin square, move names {claimed}")]
    PieceMismatch { actual: Piece, claimed: Piece },

    /// A pawn reaches the last row but no promotion piece was given.
    #[error("a promotion piece is required")]
    PromotionRequired,

    /// The promotion piece is not allowed, or the move does not promote.
    #[error("cannot promote to {0}")]
    InvalidPromotion(PieceKind),

    /// The destination is not reachable by the piece.
    #[error("{from} cannot move to {to}")]
    Unreachable { from: Position, to: Position },

    /// The move would leave the mover's own king attacked.
    #[error("move leaves the king in check")]
    LeavesKingInCheck,

    /// The game has already ended.
    #[error("the game is over")]
    GameOver,
}

/// Trait for implementing a set of chess rules.
///
/// All methods are pure: they read a [`GameState`] and return new values,
/// never modifying their input.
///
/// # Example
///
/// ```
/// use chess_engine::{RuleSet, StandardChess};
///
/// let state = StandardChess.initial_state();
/// let moves = StandardChess.legal_moves(&state);
/// assert_eq!(moves.len(), 20);
/// ```
pub trait RuleSet {
    /// Returns the initial state for these rules.
    fn initial_state(&self) -> GameState;

    /// Generates the pseudo-legal moves of the piece on `from`, whatever
    /// its color.
    fn pseudo_legal_moves(&self, state: &GameState, from: Position) -> MoveList;

    /// Generates the legal moves of the piece on `from`.
    ///
    /// Empty unless that piece belongs to the side to move.
    fn legal_moves_from(&self, state: &GameState, from: Position) -> MoveList;

    /// Generates all legal moves for the side to move.
    fn legal_moves(&self, state: &GameState) -> MoveList;

    /// Validates `m` and returns the matching authoritative move.
    ///
    /// The returned move carries the captured piece as found on the board,
    /// whatever `m.captured` said.
    fn check_move(&self, state: &GameState, m: Move) -> Result<Move, MoveError>;

    /// Returns true if `m` is legal in the state.
    fn is_legal(&self, state: &GameState, m: Move) -> bool {
        self.check_move(state, m).is_ok()
    }

    /// Plays a legal move and returns the resulting state.
    ///
    /// # Panics
    ///
    /// Debug builds panic if the move is not legal. Use
    /// [`is_legal`](RuleSet::is_legal) to check first, or use
    /// [`try_apply_move`](RuleSet::try_apply_move).
    fn apply_move(&self, state: &GameState, m: Move) -> GameState;

    /// Validates and plays a move, leaving `state` untouched on failure.
    fn try_apply_move(&self, state: &GameState, m: Move) -> Result<GameState, MoveError> {
        let m = self.check_move(state, m)?;
        Ok(self.apply_move(state, m))
    }

    /// Returns true if the side to move is in check.
    fn is_check(&self, state: &GameState) -> bool;

    /// Returns the game result if the game is over, otherwise `None`.
    fn game_result(&self, state: &GameState) -> Option<GameResult>;

    /// Returns true if the game is over.
    fn is_game_over(&self, state: &GameState) -> bool {
        self.game_result(state).is_some()
    }
}
