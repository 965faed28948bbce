//! Parsed position fields
//!
//! The board never parses text itself; notation adapters produce a
//! [`PositionInfo`] and [`Board::load`](super::board::Board::load) consumes it.

use super::game_state::CastlingRights;
use super::piece::{Color, Piece, PieceType};
use super::square::Square;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionInfo {
    pub squares: [Piece; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    /// 0 = none, otherwise file index + 1
    pub en_passant_file: u8,
    pub fifty_move_counter: u32,
    /// Full-move number, starting at 1
    pub fullmove_number: u32,
}

impl PositionInfo {
    /// The standard initial setup, built without any parser
    pub fn start_position() -> Self {
        const BACK_RANK: [PieceType; 8] = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        let mut squares = [Piece::NONE; 64];
        for (file, &piece_type) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            squares[Square::from_file_rank(file, 0).index()] = Piece::new(piece_type, Color::White);
            squares[Square::from_file_rank(file, 1).index()] = Piece::new(PieceType::Pawn, Color::White);
            squares[Square::from_file_rank(file, 6).index()] = Piece::new(PieceType::Pawn, Color::Black);
            squares[Square::from_file_rank(file, 7).index()] = Piece::new(piece_type, Color::Black);
        }

        PositionInfo {
            squares,
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant_file: 0,
            fifty_move_counter: 0,
            fullmove_number: 1,
        }
    }

    /// Half-moves played since the start of the game
    pub fn ply_count(&self) -> u32 {
        let black = u32::from(self.side_to_move == Color::Black);
        self.fullmove_number.saturating_sub(1) * 2 + black
    }
}

impl Default for PositionInfo {
    fn default() -> Self {
        Self::start_position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_layout() {
        let info = PositionInfo::start_position();
        assert_eq!(info.squares[Square::E1.index()], Piece::new(PieceType::King, Color::White));
        assert_eq!(info.squares[Square::D8.index()], Piece::new(PieceType::Queen, Color::Black));
        assert_eq!(info.squares.iter().filter(|p| !p.is_none()).count(), 32);
        assert_eq!(info.ply_count(), 0);
    }

    #[test]
    fn test_ply_count_from_move_number() {
        let mut info = PositionInfo::start_position();
        info.fullmove_number = 3;
        info.side_to_move = Color::Black;
        assert_eq!(info.ply_count(), 5);
    }
}
