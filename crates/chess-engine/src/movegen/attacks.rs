//! Attack detection for all piece types.
//!
//! Attacks are computed by looking outwards from the target square rather
//! than by reusing the move lists: a pawn attacks its diagonals even when
//! they are empty, and a square defended by a piece counts as attacked even
//! though that piece could not move there.

use chess_core::{Board, Color, Piece, PieceKind, Position};

/// Knight jumps as (row, col) deltas.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Orthogonal ray directions.
pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Diagonal ray directions.
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// All eight neighbours; also the queen's ray directions.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Returns the first piece met walking from `from` in direction `(dr, dc)`.
fn first_piece_along(board: &Board, from: Position, (dr, dc): (i8, i8)) -> Option<Piece> {
    let mut current = from;
    while let Some(next) = current.offset(dr, dc) {
        if let Some(piece) = board.at(next) {
            return Some(piece);
        }
        current = next;
    }
    None
}

/// Returns true if the given square is attacked by the given color.
pub fn is_square_attacked(board: &Board, sq: Position, by_color: Color) -> bool {
    if !sq.is_valid() {
        return false;
    }
    let attacker = |kind| Some(Piece::new(kind, by_color));

    // Pawn attacks: an enemy pawn one step "behind" sq from its own point of view
    let behind = -by_color.pawn_direction();
    let pawn_attack = [-1, 1]
        .iter()
        .filter_map(|&dc| sq.offset(behind, dc))
        .any(|from| board.at(from) == attacker(PieceKind::Pawn));
    if pawn_attack {
        return true;
    }

    // Knight attacks
    if KNIGHT_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| sq.offset(dr, dc))
        .any(|from| board.at(from) == attacker(PieceKind::Knight))
    {
        return true;
    }

    // King attacks
    if KING_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| sq.offset(dr, dc))
        .any(|from| board.at(from) == attacker(PieceKind::King))
    {
        return true;
    }

    // Rook/Queen attacks (orthogonal)
    let orthogonal = ROOK_DIRECTIONS.iter().any(|&dir| {
        let piece = first_piece_along(board, sq, dir);
        piece == attacker(PieceKind::Rook) || piece == attacker(PieceKind::Queen)
    });
    if orthogonal {
        return true;
    }

    // Bishop/Queen attacks (diagonal)
    BISHOP_DIRECTIONS.iter().any(|&dir| {
        let piece = first_piece_along(board, sq, dir);
        piece == attacker(PieceKind::Bishop) || piece == attacker(PieceKind::Queen)
    })
}

/// Returns true if the king of the given color is attacked.
///
/// A side without a king on the board is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    board
        .king_position(color)
        .is_some_and(|king| is_square_attacked(board, king, color.opposite()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    #[test]
    fn startpos_attacks() {
        let board = Board::standard();

        // e3 is attacked by pawns (and the f1 bishop is blocked)
        assert!(is_square_attacked(&board, pos("e3"), Color::White));
        assert!(is_square_attacked(&board, pos("f6"), Color::Black));

        // e4 is not attacked at start
        assert!(!is_square_attacked(&board, pos("e4"), Color::White));
        assert!(!is_square_attacked(&board, pos("e5"), Color::Black));
    }

    #[test]
    fn pawn_attacks_empty_diagonals() {
        let board = Board::empty().set(pos("d4"), Some(Piece::white(PieceKind::Pawn)));
        assert!(is_square_attacked(&board, pos("c5"), Color::White));
        assert!(is_square_attacked(&board, pos("e5"), Color::White));
        // A pawn never attacks straight ahead or backwards
        assert!(!is_square_attacked(&board, pos("d5"), Color::White));
        assert!(!is_square_attacked(&board, pos("c3"), Color::White));

        let board = Board::empty().set(pos("d4"), Some(Piece::black(PieceKind::Pawn)));
        assert!(is_square_attacked(&board, pos("c3"), Color::Black));
        assert!(!is_square_attacked(&board, pos("c5"), Color::Black));
    }

    #[test]
    fn defended_squares_count_as_attacked() {
        let board = Board::empty()
            .set(pos("d4"), Some(Piece::black(PieceKind::Knight)))
            .set(pos("e6"), Some(Piece::black(PieceKind::Pawn)));
        // e6 is occupied by Black's own pawn but covered by the knight
        assert!(is_square_attacked(&board, pos("e6"), Color::Black));
    }

    #[test]
    fn sliders_are_blocked() {
        let board = Board::empty()
            .set(pos("a1"), Some(Piece::white(PieceKind::Rook)))
            .set(pos("a4"), Some(Piece::black(PieceKind::Pawn)));
        assert!(is_square_attacked(&board, pos("a3"), Color::White));
        assert!(is_square_attacked(&board, pos("a4"), Color::White));
        assert!(!is_square_attacked(&board, pos("a5"), Color::White));
        assert!(is_square_attacked(&board, pos("h1"), Color::White));

        let board = Board::empty()
            .set(pos("b2"), Some(Piece::black(PieceKind::Queen)))
            .set(pos("e5"), Some(Piece::white(PieceKind::Knight)));
        assert!(is_square_attacked(&board, pos("e5"), Color::Black));
        assert!(!is_square_attacked(&board, pos("f6"), Color::Black));
        assert!(is_square_attacked(&board, pos("b8"), Color::Black));
    }

    #[test]
    fn king_and_knight_reach() {
        let board = Board::empty()
            .set(pos("e4"), Some(Piece::white(PieceKind::King)))
            .set(pos("a1"), Some(Piece::black(PieceKind::Knight)));
        assert!(is_square_attacked(&board, pos("f5"), Color::White));
        assert!(!is_square_attacked(&board, pos("g6"), Color::White));
        assert!(is_square_attacked(&board, pos("b3"), Color::Black));
        assert!(is_square_attacked(&board, pos("c2"), Color::Black));
        assert!(!is_square_attacked(&board, pos("b2"), Color::Black));
    }

    #[test]
    fn check_detection() {
        let board = Board::standard();
        assert!(!is_in_check(&board, Color::White));
        assert!(!is_in_check(&board, Color::Black));

        let board = Board::empty()
            .set(pos("e1"), Some(Piece::white(PieceKind::King)))
            .set(pos("e8"), Some(Piece::black(PieceKind::Rook)));
        assert!(is_in_check(&board, Color::White));
        // No black king: Black is never in check
        assert!(!is_in_check(&board, Color::Black));
    }

    #[test]
    fn off_board_square_is_not_attacked() {
        assert!(!is_square_attacked(
            &Board::standard(),
            Position::new(8, 0),
            Color::White
        ));
    }
}
