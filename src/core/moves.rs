//! Move representation
//!
//! Moves are packed into 16 bits:
//! - bits 0-5: from square
//! - bits 6-11: to square
//! - bits 12-15: [`MoveFlag`]

use super::piece::PieceType;
use super::square::Square;
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    None = 0,
    EnPassant = 1,
    Castle = 2,
    DoublePawnPush = 3,
    PromoteQueen = 4,
    PromoteKnight = 5,
    PromoteRook = 6,
    PromoteBishop = 7,
}

impl MoveFlag {
    pub const PROMOTIONS: [MoveFlag; 4] = [
        MoveFlag::PromoteQueen,
        MoveFlag::PromoteKnight,
        MoveFlag::PromoteRook,
        MoveFlag::PromoteBishop,
    ];

    const fn from_bits(bits: u16) -> Self {
        match bits {
            1 => MoveFlag::EnPassant,
            2 => MoveFlag::Castle,
            3 => MoveFlag::DoublePawnPush,
            4 => MoveFlag::PromoteQueen,
            5 => MoveFlag::PromoteKnight,
            6 => MoveFlag::PromoteRook,
            7 => MoveFlag::PromoteBishop,
            _ => MoveFlag::None,
        }
    }

    pub const fn promotion_piece(self) -> Option<PieceType> {
        match self {
            MoveFlag::PromoteQueen => Some(PieceType::Queen),
            MoveFlag::PromoteKnight => Some(PieceType::Knight),
            MoveFlag::PromoteRook => Some(PieceType::Rook),
            MoveFlag::PromoteBishop => Some(PieceType::Bishop),
            _ => None,
        }
    }
}

/// A move: from square, to square and a special-move flag
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u16);

impl Move {
    pub const NULL: Move = Move(0);

    const SQUARE_MASK: u16 = 0x3F;
    const TO_SHIFT: u16 = 6;
    const FLAG_SHIFT: u16 = 12;

    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self::with_flag(from, to, MoveFlag::None)
    }

    #[inline]
    pub const fn with_flag(from: Square, to: Square, flag: MoveFlag) -> Self {
        Move((from.0 as u16) | ((to.0 as u16) << Self::TO_SHIFT) | ((flag as u16) << Self::FLAG_SHIFT))
    }

    #[inline]
    pub const fn from(self) -> Square {
        Square((self.0 & Self::SQUARE_MASK) as u8)
    }

    #[inline]
    pub const fn to(self) -> Square {
        Square(((self.0 >> Self::TO_SHIFT) & Self::SQUARE_MASK) as u8)
    }

    #[inline]
    pub const fn flag(self) -> MoveFlag {
        MoveFlag::from_bits(self.0 >> Self::FLAG_SHIFT)
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.flag().promotion_piece().is_some()
    }

    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceType> {
        self.flag().promotion_piece()
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.flag(), MoveFlag::EnPassant)
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self.flag(), MoveFlag::Castle)
    }

    #[inline]
    pub const fn is_double_push(self) -> bool {
        matches!(self.flag(), MoveFlag::DoublePawnPush)
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Long algebraic notation, e.g. "e2e4" or "e7e8q"
    pub fn to_uci(self) -> String {
        if self.is_null() {
            return "0000".to_string();
        }
        let mut s = format!("{}{}", self.from(), self.to());
        if let Some(piece_type) = self.promotion_piece() {
            s.push(piece_type.to_char());
        }
        s
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

const MAX_MOVES: usize = 256;

/// Fixed-capacity move buffer that lives on the stack
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub fn new() -> Self {
        MoveList {
            moves: [Move::NULL; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES);
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.as_slice().iter()
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    pub fn to_vec(&self) -> Vec<Move> {
        self.as_slice().to_vec()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
