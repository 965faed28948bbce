//! Long algebraic move strings ("e2e4", "e7e8q")

use crate::core::board::Board;
use crate::core::moves::Move;
use crate::core::piece::PieceType;
use crate::core::square::Square;
use crate::engine::movegen::MoveGen;
use crate::error::MoveParseError;

/// Resolve a move string against the legal moves of `board`
pub fn parse_move(board: &Board, text: &str) -> Result<Move, MoveParseError> {
    let text = text.trim();
    let malformed = || MoveParseError::Malformed(text.to_string());

    if !(4..=5).contains(&text.len()) || !text.is_ascii() {
        return Err(malformed());
    }
    let from = Square::from_algebraic(&text[0..2]).ok_or_else(malformed)?;
    let to = Square::from_algebraic(&text[2..4]).ok_or_else(malformed)?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(c) => match PieceType::from_char(c) {
            Some(p @ (PieceType::Queen | PieceType::Rook | PieceType::Bishop | PieceType::Knight)) => Some(p),
            _ => return Err(malformed()),
        },
    };

    MoveGen::generate_legal_moves(board)
        .iter()
        .copied()
        .find(|mv| mv.from() == from && mv.to() == to && mv.promotion_piece() == promotion)
        .ok_or_else(|| MoveParseError::Illegal(text.to_string()))
}
