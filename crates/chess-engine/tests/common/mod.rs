//! Helpers shared by the integration tests.

#![allow(dead_code)]

use chess_core::{Board, Color, Piece, PieceKind, Position};
use chess_engine::{CastlingRights, GameState};

/// Builds a board from eight rows of eight characters, rank 8 first.
///
/// Uppercase letters are White, lowercase Black, `.` is an empty square.
pub fn board(rows: [&str; 8]) -> Board {
    let mut board = Board::empty();
    for (i, line) in rows.iter().enumerate() {
        assert_eq!(line.len(), 8, "row {:?} must have 8 squares", line);
        let row = 7 - i as i8;
        for (col, c) in line.chars().enumerate() {
            if c == '.' {
                continue;
            }
            let kind = PieceKind::from_char(c).unwrap_or_else(|| panic!("bad piece {:?}", c));
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            board = board.set(Position::new(row, col as i8), Some(Piece::new(kind, color)));
        }
    }
    board
}

/// Builds a state from a diagram with the given side to move and rights.
pub fn state(rows: [&str; 8], to_move: Color, castling: u8) -> GameState {
    GameState::from_board(board(rows), to_move).with_castling(CastlingRights::new(castling))
}

pub fn pos(s: &str) -> Position {
    Position::from_algebraic(s).unwrap()
}
