//! Bitboard set operations
//!
//! A bitboard is a 64-bit integer where bit `i` represents square `i`
//! (a1 = bit 0, h8 = bit 63).

use super::square::Square;
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// A set of squares packed into a u64
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const ALL: Bitboard = Bitboard(!0u64);

    pub const FILE_A: Bitboard = Bitboard(0x0101010101010101);
    pub const FILE_B: Bitboard = Bitboard(0x0202020202020202);
    pub const FILE_G: Bitboard = Bitboard(0x4040404040404040);
    pub const FILE_H: Bitboard = Bitboard(0x8080808080808080);

    pub const RANK_1: Bitboard = Bitboard(0x00000000000000FF);
    pub const RANK_8: Bitboard = Bitboard(0xFF00000000000000);

    pub const DARK_SQUARES: Bitboard = Bitboard(0xAA55AA55AA55AA55);
    pub const LIGHT_SQUARES: Bitboard = Bitboard(0x55AA55AA55AA55AA);

    #[inline]
    pub const fn new(value: u64) -> Self {
        Bitboard(value)
    }

    #[inline]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(1u64 << sq.0)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// True when two or more squares are set
    #[inline]
    pub const fn more_than_one(self) -> bool {
        self.0 & self.0.wrapping_sub(1) != 0
    }

    /// Population count
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Lowest set square. Undefined for an empty board.
    #[inline]
    pub const fn lsb(self) -> Square {
        Square(self.0.trailing_zeros() as u8)
    }

    /// Remove and return the lowest set square
    #[inline]
    pub fn pop_lsb(&mut self) -> Square {
        let sq = self.lsb();
        self.0 &= self.0 - 1;
        sq
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & (1u64 << sq.0)) != 0
    }

    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.0;
    }

    #[inline]
    pub fn clear(&mut self, sq: Square) {
        self.0 &= !(1u64 << sq.0);
    }

    #[inline]
    pub fn toggle(&mut self, sq: Square) {
        self.0 ^= 1u64 << sq.0;
    }

    #[inline]
    pub const fn north(self) -> Self {
        Bitboard(self.0 << 8)
    }

    #[inline]
    pub const fn south(self) -> Self {
        Bitboard(self.0 >> 8)
    }

    #[inline]
    pub const fn east(self) -> Self {
        Bitboard((self.0 << 1) & !Self::FILE_A.0)
    }

    #[inline]
    pub const fn west(self) -> Self {
        Bitboard((self.0 >> 1) & !Self::FILE_H.0)
    }

    #[inline]
    pub const fn north_east(self) -> Self {
        Bitboard((self.0 << 9) & !Self::FILE_A.0)
    }

    #[inline]
    pub const fn north_west(self) -> Self {
        Bitboard((self.0 << 7) & !Self::FILE_H.0)
    }

    #[inline]
    pub const fn south_east(self) -> Self {
        Bitboard((self.0 >> 7) & !Self::FILE_A.0)
    }

    #[inline]
    pub const fn south_west(self) -> Self {
        Bitboard((self.0 >> 9) & !Self::FILE_H.0)
    }

    #[inline]
    pub const fn file_mask(file: u8) -> Self {
        Bitboard(Self::FILE_A.0 << file)
    }

    #[inline]
    pub const fn rank_mask(rank: u8) -> Self {
        Bitboard(Self::RANK_1.0 << (rank * 8))
    }

    pub fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }
}

/// Iterator over the set squares, lowest first
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.pop_lsb())
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    fn into_iter(self) -> Self::IntoIter {
        BitboardIter(self)
    }
}

impl BitAnd for Bitboard {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Self;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Self;
    #[inline]
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for rank in (0..8).rev() {
            write!(f, "  {} ", rank + 1)?;
            for file in 0..8 {
                let mark = if self.contains(Square::from_file_rank(file, rank)) { 'X' } else { '.' };
                write!(f, "{} ", mark)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "    a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clear_toggle() {
        let mut bb = Bitboard::EMPTY;
        bb.set(Square(12));
        assert!(bb.contains(Square(12)));
        bb.toggle(Square(13));
        assert_eq!(bb.count(), 2);
        bb.clear(Square(12));
        bb.toggle(Square(13));
        assert!(bb.is_empty());
    }

    #[test]
    fn test_pop_lsb() {
        let mut bb = Bitboard::new(0b1010);
        assert_eq!(bb.pop_lsb(), Square(1));
        assert_eq!(bb.0, 0b1000);
        assert_eq!(bb.pop_lsb(), Square(3));
        assert!(bb.is_empty());
    }

    #[test]
    fn test_more_than_one() {
        assert!(!Bitboard::EMPTY.more_than_one());
        assert!(!Bitboard::from_square(Square(40)).more_than_one());
        assert!(Bitboard::new(0b11).more_than_one());
    }

    #[test]
    fn test_shifts_stay_on_board() {
        let a1 = Bitboard::from_square(Square::A1);
        assert_eq!(a1.north(), Bitboard::from_square(Square(8)));
        assert_eq!(a1.west(), Bitboard::EMPTY);
        assert_eq!(Bitboard::from_square(Square::H1).east(), Bitboard::EMPTY);
        assert_eq!(Bitboard::from_square(Square::A8).north(), Bitboard::EMPTY);
        assert_eq!(Bitboard::from_square(Square::H1).north_east(), Bitboard::EMPTY);
    }

    #[test]
    fn test_iter_yields_squares_in_order() {
        let squares: Vec<Square> = Bitboard::new(0b10101).iter().collect();
        assert_eq!(squares, vec![Square(0), Square(2), Square(4)]);
    }

    #[test]
    fn test_file_and_rank_masks() {
        assert_eq!(Bitboard::file_mask(0), Bitboard::FILE_A);
        assert_eq!(Bitboard::file_mask(7), Bitboard::FILE_H);
        assert_eq!(Bitboard::rank_mask(0), Bitboard::RANK_1);
        assert_eq!(Bitboard::rank_mask(7), Bitboard::RANK_8);
        assert_eq!(Bitboard::ALL.count(), 64);
    }
}
