//! The 8x8 grid of pieces.

use crate::{Color, Piece, PieceKind, Position};
use std::fmt;

const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement on an 8x8 board, indexed `[row][col]`.
///
/// `Board` is a small `Copy` value. [`Board::set`] returns an updated copy
/// and leaves the receiver untouched, so callers can explore hypothetical
/// moves without disturbing the board they started from.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Creates the standard starting placement.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for (col, &kind) in BACK_ROW.iter().enumerate() {
            board.squares[0][col] = Some(Piece::white(kind));
            board.squares[1][col] = Some(Piece::white(PieceKind::Pawn));
            board.squares[6][col] = Some(Piece::black(PieceKind::Pawn));
            board.squares[7][col] = Some(Piece::black(kind));
        }
        board
    }

    /// Returns the piece at `pos`, or `None` for an empty or off-board square.
    #[inline]
    pub fn at(&self, pos: Position) -> Option<Piece> {
        if pos.is_valid() {
            self.squares[pos.row as usize][pos.col as usize]
        } else {
            None
        }
    }

    /// Returns a copy of this board with `pos` holding `piece`.
    ///
    /// Writes to off-board positions are ignored.
    #[must_use]
    #[inline]
    pub fn set(&self, pos: Position, piece: Option<Piece>) -> Board {
        let mut next = *self;
        if pos.is_valid() {
            next.squares[pos.row as usize][pos.col as usize] = piece;
        }
        next
    }

    /// Returns true if `pos` is on the board and empty.
    #[inline]
    pub fn is_empty_at(&self, pos: Position) -> bool {
        pos.is_valid() && self.at(pos).is_none()
    }

    /// Iterates over all occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.at(pos).map(|piece| (pos, piece)))
    }

    /// Iterates over the squares occupied by `color`.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Finds the king of the given color.
    ///
    /// Returns `None` when that side has no king on the board.
    pub fn king_position(&self, color: Color) -> Option<Position> {
        let king = Piece::new(PieceKind::King, color);
        self.pieces()
            .find(|&(_, piece)| piece == king)
            .map(|(pos, _)| pos)
    }

    /// Renders the board with rank 8 at the top, using `glyph` for pieces.
    pub fn render(&self, glyph: impl Fn(Piece) -> char) -> String {
        let mut out = String::new();
        for row in (0..8).rev() {
            out.push((b'1' + row as u8) as char);
            out.push(' ');
            for col in 0..8 {
                let c = self.at(Position::new(row, col)).map_or('.', &glyph);
                out.push(c);
                if col < 7 {
                    out.push(' ');
                }
            }
            out.push('\n');
        }
        out.push_str("  a b c d e f g h");
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(Piece::to_char))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board(")?;
        writeln!(f, "{}", self)?;
        write!(f, ")")
    }
}
