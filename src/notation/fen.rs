//! FEN adapter
//!
//! Parsing is delegated to shakmaty, which also rejects impossible positions
//! (missing kings, pawns on the back rank, castling rights without a rook).
//! The parsed position is flattened into a [`PositionInfo`] for the board.

use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, CastlingSide, Chess, EnPassantMode, Position};

use crate::core::board::Board;
use crate::core::game_state::CastlingRights;
use crate::core::piece::{Color, Piece};
use crate::core::position_info::PositionInfo;
use crate::core::square::Square;
use crate::error::FenError;

pub fn parse_fen(fen: &str) -> Result<PositionInfo, FenError> {
    let parsed: Fen = fen
        .trim()
        .parse()
        .map_err(|e: shakmaty::fen::ParseFenError| FenError::Syntax {
            fen: fen.to_string(),
            reason: e.to_string(),
        })?;
    let pos: Chess = parsed
        .into_position(CastlingMode::Standard)
        .map_err(|e| FenError::IllegalPosition {
            fen: fen.to_string(),
            reason: e.to_string(),
        })?;
    Ok(position_info(&pos))
}

fn position_info(pos: &Chess) -> PositionInfo {
    let mut squares = [Piece::NONE; 64];
    let board = pos.board();
    for sq in board.occupied() {
        if let Some(piece) = board.piece_at(sq).and_then(|p| Piece::from_char(p.char())) {
            squares[sq as usize] = piece;
        }
    }

    let castles = pos.castles();
    let mut castling = 0u8;
    for (color, side, bit) in [
        (shakmaty::Color::White, CastlingSide::KingSide, CastlingRights::WHITE_KINGSIDE),
        (shakmaty::Color::White, CastlingSide::QueenSide, CastlingRights::WHITE_QUEENSIDE),
        (shakmaty::Color::Black, CastlingSide::KingSide, CastlingRights::BLACK_KINGSIDE),
        (shakmaty::Color::Black, CastlingSide::QueenSide, CastlingRights::BLACK_QUEENSIDE),
    ] {
        if castles.has(color, side) {
            castling |= bit;
        }
    }

    // Keep the en-passant file whenever a double push just happened, even if
    // no pawn can capture; the board hashes it the same way after a make.
    let en_passant_file = pos
        .ep_square(EnPassantMode::Always)
        .map_or(0, |sq| Square(sq as u8).file() + 1);

    PositionInfo {
        squares,
        side_to_move: match pos.turn() {
            shakmaty::Color::White => Color::White,
            shakmaty::Color::Black => Color::Black,
        },
        castling: CastlingRights::new(castling),
        en_passant_file,
        fifty_move_counter: pos.halfmoves(),
        fullmove_number: pos.fullmoves().get(),
    }
}

/// Export the board as FEN
pub fn to_fen(board: &Board) -> String {
    let info = board.to_info();
    let mut fen = String::new();

    for rank in (0..8).rev() {
        let mut empty = 0;
        for file in 0..8 {
            let piece = info.squares[Square::from_file_rank(file, rank).index()];
            if piece.is_none() {
                empty += 1;
                continue;
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
                empty = 0;
            }
            fen.push(piece.to_char());
        }
        if empty > 0 {
            fen.push_str(&empty.to_string());
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(match info.side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    });

    fen.push(' ');
    if info.castling == CastlingRights::NONE {
        fen.push('-');
    } else {
        for (bit, c) in [
            (CastlingRights::WHITE_KINGSIDE, 'K'),
            (CastlingRights::WHITE_QUEENSIDE, 'Q'),
            (CastlingRights::BLACK_KINGSIDE, 'k'),
            (CastlingRights::BLACK_QUEENSIDE, 'q'),
        ] {
            if info.castling.has(bit) {
                fen.push(c);
            }
        }
    }

    fen.push(' ');
    match board.en_passant_square() {
        Some(sq) => fen.push_str(&sq.to_algebraic()),
        None => fen.push('-'),
    }

    fen.push_str(&format!(" {} {}", info.fifty_move_counter, info.fullmove_number));
    fen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::PieceType;
    use crate::core::position_info::START_FEN;

    #[test]
    fn test_parse_start_position() {
        let info = parse_fen(START_FEN).unwrap();
        assert_eq!(info, PositionInfo::start_position());
    }

    #[test]
    fn test_parse_fields() {
        let info = parse_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w Kq d6 0 3").unwrap();
        assert_eq!(info.en_passant_file, 4);
        assert_eq!(info.castling.raw(), CastlingRights::WHITE_KINGSIDE | CastlingRights::BLACK_QUEENSIDE);
        assert_eq!(info.fullmove_number, 3);
        assert_eq!(info.squares[36], Piece::new(PieceType::Pawn, Color::White));
    }

    #[test]
    fn test_round_trip() {
        for fen in [
            START_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 12 40",
        ] {
            let board = Board::from_fen(fen).unwrap();
            assert_eq!(to_fen(&board), fen);
        }
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(parse_fen("not a fen"), Err(FenError::Syntax { .. })));
        // No white king
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::IllegalPosition { .. })
        ));
    }
}
