//! Core types for chess.
//!
//! This crate provides the fundamental types used across the chess engine:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Position`] for board coordinates and their "e4"-style names
//! - [`Board`] for piece placement
//! - [`Move`] and [`MoveFlag`] for move representation

mod board;
mod color;
mod mov;
mod piece;
mod position;

pub use board::Board;
pub use color::Color;
pub use mov::{Move, MoveFlag};
pub use piece::{Piece, PieceKind};
pub use position::{ParsePositionError, Position};
