//! Piece encoding
//!
//! A piece is a small integer tag: 0 is "no piece", white pawn through king
//! are 1..=6 and black pawn through king are 7..=12. The tag doubles as the
//! index into per-piece tables (bitboards, piece lists, Zobrist keys).

use std::fmt;

/// Number of distinct piece tags including the empty tag
pub const PIECE_TAGS: usize = 13;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Square offset of a single pawn push
    #[inline]
    pub const fn pawn_push(self) -> i8 {
        match self {
            Color::White => 8,
            Color::Black => -8,
        }
    }

    /// +1 for white, -1 for black
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;
    fn not(self) -> Self::Output {
        self.opposite()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceType {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Zero-based index (pawn = 0, king = 5)
    #[inline]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    pub const fn to_char(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }

    const fn from_index(index: u8) -> Self {
        match index {
            0 => PieceType::Pawn,
            1 => PieceType::Knight,
            2 => PieceType::Bishop,
            3 => PieceType::Rook,
            4 => PieceType::Queen,
            _ => PieceType::King,
        }
    }
}

/// Colored piece tag
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Piece(u8);

impl Piece {
    pub const NONE: Piece = Piece(0);

    #[inline]
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Piece(piece_type as u8 + 6 * color as u8)
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Type of a non-empty piece
    #[inline]
    pub const fn piece_type(self) -> PieceType {
        debug_assert!(self.0 != 0);
        PieceType::from_index((self.0 - 1) % 6)
    }

    /// Color of a non-empty piece
    #[inline]
    pub const fn color(self) -> Color {
        debug_assert!(self.0 != 0);
        if self.0 > 6 { Color::Black } else { Color::White }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_orthogonal_slider(self) -> bool {
        matches!(self.0, 4 | 5 | 10 | 11)
    }

    #[inline]
    pub const fn is_diagonal_slider(self) -> bool {
        matches!(self.0, 3 | 5 | 9 | 11)
    }

    /// Uppercase for white, lowercase for black, '.' for none
    pub fn to_char(self) -> char {
        if self.is_none() {
            return '.';
        }
        let c = self.piece_type().to_char();
        match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let piece_type = PieceType::from_char(c)?;
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Piece::new(piece_type, color))
    }

    /// Every non-empty piece tag in index order
    pub fn all() -> impl Iterator<Item = Piece> {
        (1..PIECE_TAGS as u8).map(Piece)
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_dense() {
        let tags: Vec<u8> = Piece::all().map(Piece::raw).collect();
        assert_eq!(tags, (1..=12).collect::<Vec<u8>>());
        assert_eq!(Piece::new(PieceType::Pawn, Color::White).raw(), 1);
        assert_eq!(Piece::new(PieceType::King, Color::Black).raw(), 12);
    }

    #[test]
    fn test_type_and_color_round_trip() {
        for color in Color::BOTH {
            for piece_type in PieceType::ALL {
                let piece = Piece::new(piece_type, color);
                assert_eq!(piece.piece_type(), piece_type);
                assert_eq!(piece.color(), color);
                assert_eq!(Piece::from_char(piece.to_char()), Some(piece));
            }
        }
    }

    #[test]
    fn test_slider_classification() {
        let queen = Piece::new(PieceType::Queen, Color::Black);
        assert!(queen.is_orthogonal_slider() && queen.is_diagonal_slider());
        assert!(Piece::new(PieceType::Rook, Color::White).is_orthogonal_slider());
        assert!(!Piece::new(PieceType::Rook, Color::White).is_diagonal_slider());
        assert!(Piece::new(PieceType::Bishop, Color::Black).is_diagonal_slider());
        assert!(!Piece::new(PieceType::Knight, Color::White).is_orthogonal_slider());
        assert!(!Piece::NONE.is_diagonal_slider());
    }
}
