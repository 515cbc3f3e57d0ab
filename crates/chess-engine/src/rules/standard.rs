//! Standard chess rules implementation.

use super::{GameResult, MoveError, RuleSet};
use crate::movegen::{
    captured_piece, generate_pseudo_legal_moves, is_in_check, make_move, MoveList,
};
use crate::GameState;
use chess_core::{Color, Move, MoveFlag, PieceKind, Position};

/// Standard chess rules (FIDE).
///
/// This is the default rule set implementing standard chess rules:
/// - Standard piece movement
/// - Castling (kingside and queenside)
/// - En passant
/// - Pawn promotion
/// - Check, checkmate, and stalemate detection
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

impl StandardChess {
    /// Builds a full move request from a from/to pair as a shell would
    /// collect it.
    ///
    /// Castling and en passant are recognised from the destination, since a
    /// user selects squares rather than move types. A promotion piece must be
    /// supplied explicitly; it is never filled in.
    pub fn move_request(
        &self,
        state: &GameState,
        from: Position,
        to: Position,
        promote_to: Option<PieceKind>,
    ) -> Result<Move, MoveError> {
        for sq in [from, to] {
            if !sq.is_valid() {
                return Err(MoveError::OffBoard(sq));
            }
        }
        let piece = state.board().at(from).ok_or(MoveError::NoPiece(from))?;

        let flag = match promote_to {
            Some(kind) => MoveFlag::Promote(kind),
            None => self
                .pseudo_legal_moves(state, from)
                .as_slice()
                .iter()
                .find(|c| c.to == to && (c.is_castling() || c.is_en_passant()))
                .map_or(MoveFlag::Normal, |c| c.flag),
        };

        Ok(Move::new(from, to, piece, flag))
    }
}

/// Returns true if playing `m` on `board` leaves the mover's king attacked.
fn leaves_king_in_check(state: &GameState, m: Move) -> bool {
    is_in_check(&make_move(state.board(), m), m.piece.color)
}

/// Returns true if the side to move has at least one legal move.
pub(crate) fn has_legal_move(state: &GameState) -> bool {
    let context = state.move_context();
    state
        .board()
        .pieces_of(state.current_player())
        .any(|(from, piece)| {
            generate_pseudo_legal_moves(state.board(), from, piece, &context)
                .as_slice()
                .iter()
                .any(|&m| !leaves_king_in_check(state, m))
        })
}

/// Plays `m` without recomputing the status flags or recording history.
///
/// Updates placement, castling rights, the en passant target, both clocks
/// and the side to move.
pub(crate) fn advance(state: &GameState, m: Move) -> GameState {
    let us = state.current_player();
    let captured = captured_piece(state.board(), m);

    let mut castling = state.castling();
    if m.piece.kind == PieceKind::King {
        castling.remove_color(us);
    }
    castling.touch(m.from);
    castling.touch(m.to);

    let en_passant = if m.is_double_push() {
        Some(Position::new((m.from.row + m.to.row) / 2, m.from.col))
    } else {
        None
    };

    let halfmove_clock = if m.piece.kind == PieceKind::Pawn || captured.is_some() {
        0
    } else {
        state.halfmove_clock() + 1
    };

    let next_player = us.opposite();
    let fullmove_number = if next_player == Color::White {
        state.fullmove_number() + 1
    } else {
        state.fullmove_number()
    };

    GameState {
        board: make_move(state.board(), m),
        current_player: next_player,
        move_history: state.move_history().to_vec(),
        is_check: false,
        is_checkmate: false,
        is_stalemate: false,
        castling,
        en_passant,
        halfmove_clock,
        fullmove_number,
    }
}

impl RuleSet for StandardChess {
    fn initial_state(&self) -> GameState {
        GameState::new()
    }

    fn pseudo_legal_moves(&self, state: &GameState, from: Position) -> MoveList {
        match state.board().at(from) {
            Some(piece) => {
                generate_pseudo_legal_moves(state.board(), from, piece, &state.move_context())
            }
            None => MoveList::new(),
        }
    }

    fn legal_moves_from(&self, state: &GameState, from: Position) -> MoveList {
        let mut moves = match state.board().at(from) {
            Some(piece) if piece.color == state.current_player() => {
                self.pseudo_legal_moves(state, from)
            }
            _ => return MoveList::new(),
        };
        moves.retain(|&m| !leaves_king_in_check(state, m));
        moves
    }

    fn legal_moves(&self, state: &GameState) -> MoveList {
        let mut moves = MoveList::new();
        for (from, _) in state.board().pieces_of(state.current_player()) {
            for &m in &self.legal_moves_from(state, from) {
                moves.push(m);
            }
        }
        moves
    }

    fn check_move(&self, state: &GameState, m: Move) -> Result<Move, MoveError> {
        for sq in [m.from, m.to] {
            if !sq.is_valid() {
                return Err(MoveError::OffBoard(sq));
            }
        }

        // 1. Our own piece is on the origin square
        let piece = state.board().at(m.from).ok_or(MoveError::NoPiece(m.from))?;
        if piece.color != state.current_player() {
            return Err(MoveError::WrongTurn { color: piece.color });
        }
        if piece != m.piece {
            return Err(MoveError::PieceMismatch {
                actual: piece,
                claimed: m.piece,
            });
        }
        if let Some(kind) = m.promote_to() {
            if !kind.is_promotion_choice() {
                return Err(MoveError::InvalidPromotion(kind));
            }
        }

        // 2. The piece can reach the destination with exactly this flag
        let candidates = self.pseudo_legal_moves(state, m.from);
        let same_square = || candidates.as_slice().iter().filter(|c| c.to == m.to);
        let candidate = match same_square().find(|c| c.flag == m.flag) {
            Some(&c) => c,
            None if same_square().any(|c| c.flag.is_promotion()) => {
                return Err(MoveError::PromotionRequired);
            }
            None => {
                return Err(match m.promote_to() {
                    Some(kind) if same_square().next().is_some() => {
                        MoveError::InvalidPromotion(kind)
                    }
                    _ => MoveError::Unreachable {
                        from: m.from,
                        to: m.to,
                    },
                });
            }
        };

        // 3. Our king is safe afterwards
        if leaves_king_in_check(state, candidate) {
            return Err(MoveError::LeavesKingInCheck);
        }

        Ok(candidate)
    }

    fn apply_move(&self, state: &GameState, m: Move) -> GameState {
        debug_assert!(
            self.is_legal(state, m),
            "apply_move called with illegal move {:?}",
            m
        );

        let recorded = m.capturing(captured_piece(state.board(), m));
        let mut next = advance(state, m);
        next.move_history.push(recorded);
        next.with_status()
    }

    fn is_check(&self, state: &GameState) -> bool {
        state.is_check()
    }

    fn game_result(&self, state: &GameState) -> Option<GameResult> {
        state.result()
    }
}
