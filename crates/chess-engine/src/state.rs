//! Game state: the board plus everything the rules need to continue a game.

use chess_core::{Board, Color, Move, Position};

use crate::movegen::{is_in_check, MoveContext};
use crate::rules::{has_legal_move, GameResult};

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove_kingside(color);
        self.remove_queenside(color);
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_KINGSIDE,
            Color::Black => !Self::BLACK_KINGSIDE,
        };
        self.0 &= mask;
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_QUEENSIDE,
            Color::Black => !Self::BLACK_QUEENSIDE,
        };
        self.0 &= mask;
    }

    /// Removes the right tied to a rook's home corner, if `sq` is one.
    ///
    /// Called for both squares of every move: a rook leaving its corner and
    /// a capture landing on it both end that wing's right.
    pub fn touch(&mut self, sq: Position) {
        match sq {
            Position::A1 => self.remove_queenside(Color::White),
            Position::H1 => self.remove_kingside(Color::White),
            Position::A8 => self.remove_queenside(Color::Black),
            Position::H8 => self.remove_kingside(Color::Black),
            _ => {}
        }
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// A complete snapshot of a game.
///
/// States are never edited once handed out. The only ways to obtain one are
/// [`GameState::new`], [`GameState::from_board`] and the rules' transition
/// (see [`RuleSet::apply_move`](crate::RuleSet::apply_move)), and all of them
/// compute the check, checkmate and stalemate flags for the side to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) current_player: Color,
    pub(crate) move_history: Vec<Move>,
    pub(crate) is_check: bool,
    pub(crate) is_checkmate: bool,
    pub(crate) is_stalemate: bool,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Position>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl GameState {
    /// Creates the standard starting state.
    pub fn new() -> Self {
        GameState {
            castling: CastlingRights::ALL,
            ..Self::blank(Board::standard(), Color::White)
        }
        .with_status()
    }

    /// Creates a state from an arbitrary placement with `to_move` on move.
    ///
    /// No castling rights and no en passant target are granted; use the
    /// `with_*` methods to add them.
    pub fn from_board(board: Board, to_move: Color) -> Self {
        Self::blank(board, to_move).with_status()
    }

    /// Returns this state with the given castling rights.
    #[must_use]
    pub fn with_castling(self, castling: CastlingRights) -> Self {
        GameState { castling, ..self }.with_status()
    }

    /// Returns this state with the given en passant target.
    #[must_use]
    pub fn with_en_passant(self, en_passant: Option<Position>) -> Self {
        GameState { en_passant, ..self }.with_status()
    }

    /// Returns this state with the given move counters.
    #[must_use]
    pub fn with_clocks(self, halfmove_clock: u32, fullmove_number: u32) -> Self {
        GameState {
            halfmove_clock,
            fullmove_number,
            ..self
        }
    }

    fn blank(board: Board, to_move: Color) -> Self {
        GameState {
            board,
            current_player: to_move,
            move_history: Vec::new(),
            is_check: false,
            is_checkmate: false,
            is_stalemate: false,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Recomputes check, checkmate and stalemate for the side to move.
    pub(crate) fn with_status(mut self) -> Self {
        self.is_check = is_in_check(&self.board, self.current_player);
        let stuck = !has_legal_move(&self);
        self.is_checkmate = stuck && self.is_check;
        self.is_stalemate = stuck && !self.is_check;
        self
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline]
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    /// Every committed move, oldest first.
    #[inline]
    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.move_history.last()
    }

    /// Returns true if the side to move is in check.
    #[inline]
    pub fn is_check(&self) -> bool {
        self.is_check
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.is_checkmate
    }

    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.is_stalemate
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// The square a pawn skipped on the previous move, if it advanced two rows.
    #[inline]
    pub fn en_passant(&self) -> Option<Position> {
        self.en_passant
    }

    /// Half-moves since the last pawn move or capture.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Starts at 1 and increments after each Black move.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// The castling and en passant context move generation needs.
    #[inline]
    pub fn move_context(&self) -> MoveContext {
        MoveContext {
            castling: self.castling,
            en_passant: self.en_passant,
        }
    }

    /// Returns the result if the game has ended.
    pub fn result(&self) -> Option<GameResult> {
        if self.is_checkmate {
            Some(GameResult::Checkmate {
                winner: self.current_player.opposite(),
            })
        } else if self.is_stalemate {
            Some(GameResult::Stalemate)
        } else {
            None
        }
    }

    /// Returns true once checkmate or stalemate has been reached.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.is_checkmate || self.is_stalemate
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
