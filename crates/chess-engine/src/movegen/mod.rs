//! Move generation.
//!
//! This module enumerates pseudo-legal moves for a single piece: moves that
//! follow the piece's movement rules but may still leave the mover's own
//! king in check. The rules layer filters them into legal moves.

mod attacks;
pub mod perft;

use crate::state::CastlingRights;
use chess_core::{Board, Move, MoveFlag, Piece, PieceKind, Position};

pub use attacks::{is_in_check, is_square_attacked};
use attacks::{BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves the list can hold.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// The parts of a game state, beyond the board, that decide which special
/// moves exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveContext {
    pub castling: CastlingRights,
    pub en_passant: Option<Position>,
}

impl MoveContext {
    /// No castling rights and no en passant target.
    pub const NONE: MoveContext = MoveContext {
        castling: CastlingRights::NONE,
        en_passant: None,
    };
}

/// Generates the pseudo-legal moves of `piece` standing on `from`.
///
/// An off-board `from` yields no moves. Whose turn it is does not matter:
/// only `piece.color` decides friend from foe.
pub fn generate_pseudo_legal_moves(
    board: &Board,
    from: Position,
    piece: Piece,
    context: &MoveContext,
) -> MoveList {
    let mut moves = MoveList::new();
    if !from.is_valid() {
        return moves;
    }

    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(board, from, piece, context, &mut moves),
        PieceKind::Knight => generate_step_moves(board, from, piece, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Bishop => {
            generate_slider_moves(board, from, piece, &BISHOP_DIRECTIONS, &mut moves)
        }
        PieceKind::Rook => generate_slider_moves(board, from, piece, &ROOK_DIRECTIONS, &mut moves),
        PieceKind::Queen => generate_slider_moves(board, from, piece, &KING_OFFSETS, &mut moves),
        PieceKind::King => {
            generate_step_moves(board, from, piece, &KING_OFFSETS, &mut moves);
            generate_castling_moves(board, from, piece, context, &mut moves);
        }
    }

    moves
}

/// Pushes a pawn move, expanding it into one move per promotion choice when
/// it lands on the last row.
fn push_pawn_move(moves: &mut MoveList, m: Move) {
    if m.to.row == m.piece.color.promotion_row() {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move {
                flag: MoveFlag::Promote(kind),
                ..m
            });
        }
    } else {
        moves.push(m);
    }
}

/// Generates pseudo-legal pawn moves.
fn generate_pawn_moves(
    board: &Board,
    from: Position,
    piece: Piece,
    context: &MoveContext,
    moves: &mut MoveList,
) {
    let us = piece.color;
    let dir = us.pawn_direction();

    // Single and double pushes
    if let Some(one) = from.offset(dir, 0).filter(|&sq| board.is_empty_at(sq)) {
        push_pawn_move(moves, Move::normal(from, one, piece));

        if from.row == us.pawn_row() {
            if let Some(two) = one.offset(dir, 0).filter(|&sq| board.is_empty_at(sq)) {
                moves.push(Move::normal(from, two, piece));
            }
        }
    }

    // Captures, including en passant
    for dc in [-1, 1] {
        let Some(to) = from.offset(dir, dc) else {
            continue;
        };
        match board.at(to) {
            Some(target) if target.color != us => {
                push_pawn_move(moves, Move::normal(from, to, piece).capturing(Some(target)));
            }
            None if context.en_passant == Some(to) => {
                // The passed pawn sits beside us, on the destination's file.
                let passed = board.at(Position::new(from.row, to.col));
                if passed == Some(Piece::new(PieceKind::Pawn, us.opposite())) {
                    moves.push(Move::new(from, to, piece, MoveFlag::EnPassant).capturing(passed));
                }
            }
            _ => {}
        }
    }
}

/// Generates moves for pieces that jump to fixed offsets (knight, king).
fn generate_step_moves(
    board: &Board,
    from: Position,
    piece: Piece,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, dc) in offsets {
        let Some(to) = from.offset(dr, dc) else {
            continue;
        };
        match board.at(to) {
            Some(target) if target.color == piece.color => {}
            target => moves.push(Move::normal(from, to, piece).capturing(target)),
        }
    }
}

/// Generates moves for pieces that slide along rays (bishop, rook, queen).
fn generate_slider_moves(
    board: &Board,
    from: Position,
    piece: Piece,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(to) = current.offset(dr, dc) {
            match board.at(to) {
                None => moves.push(Move::normal(from, to, piece)),
                Some(target) => {
                    if target.color != piece.color {
                        moves.push(Move::normal(from, to, piece).capturing(Some(target)));
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

/// Returns the rook's (from, to) squares for a castling move on `row`.
pub(crate) fn castling_rook_squares(flag: MoveFlag, row: i8) -> Option<(Position, Position)> {
    match flag {
        MoveFlag::CastleKingside => Some((Position::new(row, 7), Position::new(row, 5))),
        MoveFlag::CastleQueenside => Some((Position::new(row, 0), Position::new(row, 3))),
        _ => None,
    }
}

/// Generates castling moves if the king may castle.
///
/// Besides the right itself, castling needs the king and rook on their home
/// squares, an empty path between them, and no attack on the king's square
/// or on any square the king crosses or lands on.
fn generate_castling_moves(
    board: &Board,
    from: Position,
    piece: Piece,
    context: &MoveContext,
    moves: &mut MoveList,
) {
    let us = piece.color;
    let them = us.opposite();
    let row = us.back_row();

    if from != Position::new(row, 4) {
        return;
    }
    let kingside = context.castling.can_castle_kingside(us);
    let queenside = context.castling.can_castle_queenside(us);
    if !kingside && !queenside {
        return;
    }

    // Can't castle out of check
    if is_square_attacked(board, from, them) {
        return;
    }

    let rook = Some(Piece::new(PieceKind::Rook, us));
    let empty = |cols: &[i8]| cols.iter().all(|&c| board.is_empty_at(Position::new(row, c)));
    let safe = |cols: &[i8]| {
        cols.iter()
            .all(|&c| !is_square_attacked(board, Position::new(row, c), them))
    };

    if kingside && board.at(Position::new(row, 7)) == rook && empty(&[5, 6]) && safe(&[5, 6]) {
        moves.push(Move::new(
            from,
            Position::new(row, 6),
            piece,
            MoveFlag::CastleKingside,
        ));
    }

    if queenside && board.at(Position::new(row, 0)) == rook && empty(&[1, 2, 3]) && safe(&[3, 2])
    {
        moves.push(Move::new(
            from,
            Position::new(row, 2),
            piece,
            MoveFlag::CastleQueenside,
        ));
    }
}

/// Returns the piece `m` removes from the board, if any.
pub fn captured_piece(board: &Board, m: Move) -> Option<Piece> {
    match m.flag {
        MoveFlag::EnPassant => board.at(Position::new(m.from.row, m.to.col)),
        MoveFlag::CastleKingside | MoveFlag::CastleQueenside => None,
        _ => board.at(m.to),
    }
}

/// Plays `m` on a copy of `board` and returns the copy.
///
/// Only piece placement changes: the captured piece disappears (for en
/// passant, from beside the origin), castling also relocates the rook, and
/// a promotion places the chosen piece. No legality checks are performed.
pub fn make_move(board: &Board, m: Move) -> Board {
    let placed = match m.flag {
        MoveFlag::Promote(kind) => m.piece.with_kind(kind),
        _ => m.piece,
    };
    let mut next = board.set(m.from, None).set(m.to, Some(placed));

    if m.flag == MoveFlag::EnPassant {
        next = next.set(Position::new(m.from.row, m.to.col), None);
    }

    if let Some((rook_from, rook_to)) = castling_rook_squares(m.flag, m.from.row) {
        let rook = board.at(rook_from);
        next = next.set(rook_from, None).set(rook_to, rook);
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Color;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    fn destinations(moves: &MoveList) -> Vec<String> {
        let mut names: Vec<String> = moves.as_slice().iter().map(|m| m.to.to_algebraic()).collect();
        names.sort();
        names
    }

    fn kings_and(pieces: &[(&str, Piece)]) -> Board {
        pieces.iter().fold(
            Board::empty()
                .set(pos("e1"), Some(Piece::white(PieceKind::King)))
                .set(pos("e8"), Some(Piece::black(PieceKind::King))),
            |board, &(sq, piece)| board.set(pos(sq), Some(piece)),
        )
    }

    #[test]
    fn movelist_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let pawn = Piece::white(PieceKind::Pawn);
        let m1 = Move::normal(pos("e2"), pos("e4"), pawn);
        let m2 = Move::normal(pos("d2"), pos("d4"), pawn);

        list.push(m1);
        list.push(m2);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], m1);
        assert_eq!(list[1], m2);
    }

    #[test]
    fn movelist_retain() {
        let mut list = MoveList::new();
        let pawn = Piece::white(PieceKind::Pawn);

        list.push(Move::normal(pos("e2"), pos("e3"), pawn));
        list.push(Move::normal(pos("e2"), pos("e4"), pawn));
        list.push(Move::normal(pos("e3"), pos("e4"), pawn));

        // Keep only moves from e2
        list.retain(|m| m.from == pos("e2"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn pawn_pushes_from_home_row() {
        let board = Board::standard();
        let pawn = Piece::white(PieceKind::Pawn);
        let moves = generate_pseudo_legal_moves(&board, pos("e2"), pawn, &MoveContext::NONE);
        assert_eq!(destinations(&moves), ["e3", "e4"]);

        let black = Piece::black(PieceKind::Pawn);
        let moves = generate_pseudo_legal_moves(&board, pos("d7"), black, &MoveContext::NONE);
        assert_eq!(destinations(&moves), ["d5", "d6"]);
    }

    #[test]
    fn pawn_double_push_needs_both_squares_empty() {
        let pawn = Piece::white(PieceKind::Pawn);
        let blocker = Piece::black(PieceKind::Knight);

        let board = kings_and(&[("c2", pawn), ("c3", blocker)]);
        let moves = generate_pseudo_legal_moves(&board, pos("c2"), pawn, &MoveContext::NONE);
        assert!(moves.is_empty());

        let board = kings_and(&[("c2", pawn), ("c4", blocker)]);
        let moves = generate_pseudo_legal_moves(&board, pos("c2"), pawn, &MoveContext::NONE);
        assert_eq!(destinations(&moves), ["c3"]);
    }

    #[test]
    fn pawn_captures_only_enemies() {
        let pawn = Piece::white(PieceKind::Pawn);
        let board = kings_and(&[
            ("d4", pawn),
            ("c5", Piece::black(PieceKind::Bishop)),
            ("e5", Piece::white(PieceKind::Knight)),
        ]);
        let moves = generate_pseudo_legal_moves(&board, pos("d4"), pawn, &MoveContext::NONE);
        assert_eq!(destinations(&moves), ["c5", "d5"]);
        let capture = moves.as_slice().iter().find(|m| m.to == pos("c5")).unwrap();
        assert_eq!(capture.captured, Some(Piece::black(PieceKind::Bishop)));
    }

    #[test]
    fn promotion_emits_four_candidates() {
        let pawn = Piece::white(PieceKind::Pawn);
        let board = Board::empty()
            .set(pos("a7"), Some(pawn))
            .set(pos("b8"), Some(Piece::black(PieceKind::Rook)));
        let moves = generate_pseudo_legal_moves(&board, pos("a7"), pawn, &MoveContext::NONE);

        assert_eq!(moves.len(), 8);
        assert!(moves.as_slice().iter().all(|m| m.flag.is_promotion()));
        let to_b8: Vec<_> = moves
            .as_slice()
            .iter()
            .filter(|m| m.to == pos("b8"))
            .filter_map(|m| m.promote_to())
            .collect();
        assert_eq!(to_b8, PieceKind::PROMOTIONS);
    }

    #[test]
    fn en_passant_candidate() {
        let white = Piece::white(PieceKind::Pawn);
        let black = Piece::black(PieceKind::Pawn);
        let board = kings_and(&[("e5", white), ("d5", black)]);
        let context = MoveContext {
            en_passant: Some(pos("d6")),
            ..MoveContext::NONE
        };

        let moves = generate_pseudo_legal_moves(&board, pos("e5"), white, &context);
        let ep = moves
            .as_slice()
            .iter()
            .find(|m| m.flag == MoveFlag::EnPassant)
            .copied()
            .unwrap();
        assert_eq!(ep.to, pos("d6"));
        assert_eq!(ep.captured, Some(black));

        // Without the target the diagonal is just an empty square
        let moves = generate_pseudo_legal_moves(&board, pos("e5"), white, &MoveContext::NONE);
        assert_eq!(destinations(&moves), ["e6"]);
    }

    #[test]
    fn knight_moves() {
        let knight = Piece::white(PieceKind::Knight);
        let board = Board::standard();
        let moves = generate_pseudo_legal_moves(&board, pos("g1"), knight, &MoveContext::NONE);
        assert_eq!(destinations(&moves), ["f3", "h3"]);

        let corner = Board::empty().set(pos("a1"), Some(knight));
        let moves = generate_pseudo_legal_moves(&corner, pos("a1"), knight, &MoveContext::NONE);
        assert_eq!(destinations(&moves), ["b3", "c2"]);
    }

    #[test]
    fn slider_rays_stop_at_pieces() {
        let rook = Piece::white(PieceKind::Rook);
        let board = kings_and(&[
            ("d4", rook),
            ("d6", Piece::black(PieceKind::Pawn)),
            ("b4", Piece::white(PieceKind::Pawn)),
        ]);
        let moves = generate_pseudo_legal_moves(&board, pos("d4"), rook, &MoveContext::NONE);
        assert_eq!(
            destinations(&moves),
            ["c4", "d1", "d2", "d3", "d5", "d6", "e4", "f4", "g4", "h4"]
        );
    }

    #[test]
    fn queen_in_open_board() {
        let queen = Piece::black(PieceKind::Queen);
        let board = Board::empty().set(pos("d4"), Some(queen));
        let moves = generate_pseudo_legal_moves(&board, pos("d4"), queen, &MoveContext::NONE);
        assert_eq!(moves.len(), 27);

        let bishop = Piece::black(PieceKind::Bishop);
        let moves = generate_pseudo_legal_moves(&board, pos("d4"), bishop, &MoveContext::NONE);
        assert_eq!(moves.len(), 13);
    }

    #[test]
    fn king_castling_candidates() {
        let king = Piece::white(PieceKind::King);
        let rook = Piece::white(PieceKind::Rook);
        let board = kings_and(&[("a1", rook), ("h1", rook)]);
        let context = MoveContext {
            castling: CastlingRights::ALL,
            en_passant: None,
        };

        let moves = generate_pseudo_legal_moves(&board, pos("e1"), king, &context);
        let flags: Vec<_> = moves
            .as_slice()
            .iter()
            .filter(|m| m.is_castling())
            .map(|m| (m.flag, m.to))
            .collect();
        assert_eq!(
            flags,
            [
                (MoveFlag::CastleKingside, pos("g1")),
                (MoveFlag::CastleQueenside, pos("c1"))
            ]
        );

        // Without rights there is nothing to castle
        let moves = generate_pseudo_legal_moves(&board, pos("e1"), king, &MoveContext::NONE);
        assert!(moves.as_slice().iter().all(|m| !m.is_castling()));
    }

    #[test]
    fn castling_blocked_by_attacked_transit_square() {
        let king = Piece::white(PieceKind::King);
        let rook = Piece::white(PieceKind::Rook);
        // Black rook on f8 covers f1; the king would pass through it.
        let board = kings_and(&[("h1", rook), ("f8", Piece::black(PieceKind::Rook))]);
        let context = MoveContext {
            castling: CastlingRights::ALL,
            en_passant: None,
        };
        let moves = generate_pseudo_legal_moves(&board, pos("e1"), king, &context);
        assert!(moves.as_slice().iter().all(|m| !m.is_castling()));
    }

    #[test]
    fn queenside_castling_ignores_attack_on_b_file() {
        let king = Piece::white(PieceKind::King);
        let rook = Piece::white(PieceKind::Rook);
        // b1 is attacked but the king never crosses it.
        let board = kings_and(&[("a1", rook), ("b8", Piece::black(PieceKind::Rook))]);
        let context = MoveContext {
            castling: CastlingRights::ALL,
            en_passant: None,
        };
        let moves = generate_pseudo_legal_moves(&board, pos("e1"), king, &context);
        assert!(moves
            .as_slice()
            .iter()
            .any(|m| m.flag == MoveFlag::CastleQueenside));
    }

    #[test]
    fn off_board_origin_yields_nothing() {
        let queen = Piece::white(PieceKind::Queen);
        let moves = generate_pseudo_legal_moves(
            &Board::standard(),
            Position::new(-1, 3),
            queen,
            &MoveContext::NONE,
        );
        assert!(moves.is_empty());
    }

    #[test]
    fn make_move_leaves_input_untouched() {
        let board = Board::standard();
        let knight = Piece::white(PieceKind::Knight);
        let next = make_move(&board, Move::normal(pos("g1"), pos("f3"), knight));

        assert_eq!(next.at(pos("f3")), Some(knight));
        assert_eq!(next.at(pos("g1")), None);
        assert_eq!(board.at(pos("g1")), Some(knight));
    }

    #[test]
    fn make_move_special_cases() {
        let black_king = Piece::black(PieceKind::King);
        let black_rook = Piece::black(PieceKind::Rook);
        let board = Board::empty()
            .set(pos("e8"), Some(black_king))
            .set(pos("a8"), Some(black_rook));
        let castle = Move::new(pos("e8"), pos("c8"), black_king, MoveFlag::CastleQueenside);
        let next = make_move(&board, castle);
        assert_eq!(next.at(pos("c8")), Some(black_king));
        assert_eq!(next.at(pos("d8")), Some(black_rook));
        assert_eq!(next.at(pos("a8")), None);

        let pawn = Piece::white(PieceKind::Pawn);
        let board = Board::empty().set(pos("g7"), Some(pawn));
        let promo = Move::new(pos("g7"), pos("g8"), pawn, MoveFlag::Promote(PieceKind::Knight));
        let next = make_move(&board, promo);
        assert_eq!(next.at(pos("g8")), Some(Piece::new(PieceKind::Knight, Color::White)));
    }
}
