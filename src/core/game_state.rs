//! Irreversible position state
//!
//! Everything `unmake_move` cannot recompute from the move itself is kept in a
//! [`GameState`] snapshot; the board pushes one per move and pops it on undo.

use super::piece::{Color, PieceType};
use super::square::Square;

/// Castling rights packed into 4 bits
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0xF);

    pub const WHITE_KINGSIDE: u8 = 1;
    pub const WHITE_QUEENSIDE: u8 = 2;
    pub const BLACK_KINGSIDE: u8 = 4;
    pub const BLACK_QUEENSIDE: u8 = 8;

    #[inline]
    pub const fn new(bits: u8) -> Self {
        CastlingRights(bits & 0xF)
    }

    #[inline]
    pub const fn has(self, right: u8) -> bool {
        (self.0 & right) != 0
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn without(self, rights: u8) -> Self {
        CastlingRights(self.0 & !rights)
    }

    pub const fn kingside(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    pub const fn queenside(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }

    /// Rights lost when a piece leaves or lands on `sq`
    pub const fn lost_by_touching(sq: Square) -> u8 {
        match sq.0 {
            0 => Self::WHITE_QUEENSIDE,
            7 => Self::WHITE_KINGSIDE,
            4 => Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE,
            56 => Self::BLACK_QUEENSIDE,
            63 => Self::BLACK_KINGSIDE,
            60 => Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE,
            _ => 0,
        }
    }
}

/// Undo snapshot pushed by every make (including null moves)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct GameState {
    /// Piece type removed by the move that produced this state
    pub captured: Option<PieceType>,
    /// 0 = none, otherwise file index + 1
    pub en_passant_file: u8,
    pub castling: CastlingRights,
    /// Half-moves since the last capture or pawn move
    pub fifty_move_counter: u32,
    pub hash: u64,
}
