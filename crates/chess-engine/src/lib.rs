//! Chess rules engine over an 8×8 grid board.
//!
//! This crate provides:
//! - [`GameState`] - An immutable game snapshot: board, side to move, history,
//!   castling rights, en passant target and status flags
//! - [`RuleSet`] - Trait separating the rules from the state, with
//!   [`StandardChess`] as the standard implementation
//! - [`Game`] - A game session that refuses moves once the game has ended
//! - Move generation, attack detection and perft
//!
//! # Architecture
//!
//! Every request flows one way: the generator enumerates pseudo-legal moves
//! for a piece, the legality filter drops those that leave the mover's king
//! attacked, and the transition produces a new state with its check,
//! checkmate and stalemate flags already computed. No value is ever mutated
//! once handed out.
//!
//! # Example
//!
//! ```
//! use chess_engine::{create_initial_state, generate_legal_destinations, try_apply_move};
//! use chess_core::Position;
//!
//! let state = create_initial_state();
//! let e2 = Position::from_algebraic("e2").unwrap();
//! let e4 = Position::from_algebraic("e4").unwrap();
//!
//! assert_eq!(generate_legal_destinations(&state, e2).len(), 2);
//!
//! let next = try_apply_move(&state, e2, e4, None).unwrap();
//! assert_eq!(next.move_history().len(), 1);
//! assert!(try_apply_move(&next, e2, e4, None).is_err());
//! ```

mod game;
pub mod movegen;
pub mod rules;
mod state;

pub use game::{
    create_initial_state, generate_legal_destinations, parse_coordinate_move, try_apply_move,
    Game, GameError,
};
pub use movegen::{
    captured_piece, generate_pseudo_legal_moves, is_in_check, is_square_attacked, make_move,
    MoveContext, MoveList,
};
pub use rules::{GameResult, MoveError, RuleSet, StandardChess};
pub use state::{CastlingRights, GameState};
