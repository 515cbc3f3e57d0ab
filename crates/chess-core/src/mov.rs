//! Move representation.

use crate::{Color, Piece, PieceKind, Position};
use std::fmt;

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    /// Normal move, including pawn double pushes and ordinary captures.
    Normal,
    /// Kingside castling (O-O).
    CastleKingside,
    /// Queenside castling (O-O-O).
    CastleQueenside,
    /// En passant capture.
    EnPassant,
    /// Pawn promotion to the given kind.
    Promote(PieceKind),
}

impl MoveFlag {
    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceKind> {
        match self {
            MoveFlag::Promote(kind) => Some(kind),
            _ => None,
        }
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self, MoveFlag::Promote(_))
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }

    /// Returns true if this is an en passant capture.
    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self, MoveFlag::EnPassant)
    }
}

/// A chess move.
///
/// A `Move` only describes a transition. It becomes authoritative once the
/// rules have matched it against the generated candidates for a position.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    /// The piece standing on `from` before the move.
    pub piece: Piece,
    /// The piece removed by this move; for en passant, the passed pawn.
    pub captured: Option<Piece>,
    pub flag: MoveFlag,
}

impl Move {
    /// Creates a move with the given flag and no capture.
    #[inline]
    pub const fn new(from: Position, to: Position, piece: Piece, flag: MoveFlag) -> Self {
        Move {
            from,
            to,
            piece,
            captured: None,
            flag,
        }
    }

    /// Creates a normal move (no special flags).
    #[inline]
    pub const fn normal(from: Position, to: Position, piece: Piece) -> Self {
        Self::new(from, to, piece, MoveFlag::Normal)
    }

    /// Returns this move marked as capturing `captured`.
    #[inline]
    pub const fn capturing(mut self, captured: Option<Piece>) -> Self {
        self.captured = captured;
        self
    }

    /// Returns the color of the moving side.
    #[inline]
    pub const fn color(self) -> Color {
        self.piece.color
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn promote_to(self) -> Option<PieceKind> {
        self.flag.promotion_piece()
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        self.flag.is_castling()
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.flag.is_en_passant()
    }

    /// Returns true if this is a pawn advancing two rows.
    #[inline]
    pub const fn is_double_push(self) -> bool {
        matches!(self.piece.kind, PieceKind::Pawn) && (self.to.row - self.from.row).abs() == 2
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promote_to() {
            Some(kind) => format!("{}{}{}", self.from, self.to, kind.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// A placeholder move (never legal).
    pub const NULL: Move = Move::normal(
        Position::A1,
        Position::A1,
        Piece::white(PieceKind::Pawn),
    );
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {})", self.piece.to_char(), self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
