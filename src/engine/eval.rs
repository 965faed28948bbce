//! Static evaluation
//!
//! Scores are centipawns from white's point of view. The default evaluator
//! sums material, piece-square bonuses, attack mobility, doubled-pawn
//! penalties and a middlegame king-shelter term. It is a pure function of the
//! board: the game phase is computed per call and selects the king table.

use crate::core::attacks;
use crate::core::bitboard::Bitboard;
use crate::core::board::Board;
use crate::core::piece::{Color, Piece, PieceType};
use crate::core::square::Square;

pub trait Evaluator {
    /// Absolute score, positive when white stands better
    fn evaluate(&self, board: &Board) -> i32;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GamePhase {
    Middlegame,
    Endgame,
}

pub const fn piece_value(piece_type: PieceType) -> i32 {
    match piece_type {
        PieceType::Pawn => 100,
        PieceType::Knight => 300,
        PieceType::Bishop => 300,
        PieceType::Rook => 500,
        PieceType::Queen => 900,
        PieceType::King => 0,
    }
}

const MOBILITY_WEIGHT: i32 = 4;
const DOUBLED_PAWN_PENALTY: i32 = 10;
const UNCASTLED_KING_PENALTY: i32 = 30;

// Tables are laid out as seen from white: first row is the eighth rank.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_MIDDLEGAME_TABLE: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

#[rustfmt::skip]
const KING_ENDGAME_TABLE: [i32; 64] = [
    -50,-40,-30,-20,-20,-30,-40,-50,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-30,  0,  0,  0,  0,-30,-30,
    -50,-30,-30,-30,-30,-30,-30,-50,
];

/// King table for a phase
pub const fn king_table(phase: GamePhase) -> &'static [i32; 64] {
    match phase {
        GamePhase::Middlegame => &KING_MIDDLEGAME_TABLE,
        GamePhase::Endgame => &KING_ENDGAME_TABLE,
    }
}

pub fn piece_square_table(piece_type: PieceType, phase: GamePhase) -> &'static [i32; 64] {
    match piece_type {
        PieceType::Pawn => &PAWN_TABLE,
        PieceType::Knight => &KNIGHT_TABLE,
        PieceType::Bishop => &BISHOP_TABLE,
        PieceType::Rook => &ROOK_TABLE,
        PieceType::Queen => &QUEEN_TABLE,
        PieceType::King => king_table(phase),
    }
}

/// Table lookup for a piece of `color` on `sq`
#[inline]
fn table_bonus(table: &[i32; 64], sq: Square, color: Color) -> i32 {
    // Row 0 of the table is rank 8 for white; black reads it mirrored.
    let index = match color {
        Color::White => sq.flip_vertical().index(),
        Color::Black => sq.index(),
    };
    table[index]
}

/// Endgame once queens are off, or when neither side has more than one
/// rook or queen.
pub fn game_phase(board: &Board) -> GamePhase {
    let majors = |color: Color| {
        board.piece_list(Piece::new(PieceType::Queen, color)).len()
            + board.piece_list(Piece::new(PieceType::Rook, color)).len()
    };
    let queens = board.pieces_of(PieceType::Queen, Color::White) | board.pieces_of(PieceType::Queen, Color::Black);
    if queens.is_empty() || (majors(Color::White) <= 1 && majors(Color::Black) <= 1) {
        GamePhase::Endgame
    } else {
        GamePhase::Middlegame
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PieceSquareEvaluator;

impl PieceSquareEvaluator {
    fn material_and_placement(board: &Board, color: Color, phase: GamePhase) -> i32 {
        let mut score = 0;
        for piece_type in PieceType::ALL {
            let table = piece_square_table(piece_type, phase);
            for sq in board.piece_list(Piece::new(piece_type, color)).iter() {
                score += piece_value(piece_type) + table_bonus(table, sq, color);
            }
        }
        score
    }

    /// Squares attacked by minor and major pieces, friendly squares excluded
    fn mobility(board: &Board, color: Color) -> i32 {
        let occupied = board.occupied();
        let not_ours = !board.color_bitboard(color);
        let mut reach = 0;
        for sq in board.pieces_of(PieceType::Knight, color) {
            reach += (attacks::knight_attacks(sq) & not_ours).count();
        }
        for sq in board.pieces_of(PieceType::Bishop, color) {
            reach += (attacks::bishop_attacks(sq, occupied) & not_ours).count();
        }
        for sq in board.pieces_of(PieceType::Rook, color) {
            reach += (attacks::rook_attacks(sq, occupied) & not_ours).count();
        }
        for sq in board.pieces_of(PieceType::Queen, color) {
            reach += (attacks::queen_attacks(sq, occupied) & not_ours).count();
        }
        reach as i32 * MOBILITY_WEIGHT
    }

    fn doubled_pawns(board: &Board, color: Color) -> i32 {
        let pawns = board.pieces_of(PieceType::Pawn, color);
        (0..8)
            .map(|file| (pawns & Bitboard::file_mask(file)).count().saturating_sub(1) as i32)
            .sum::<i32>()
            * -DOUBLED_PAWN_PENALTY
    }

    /// Middlegame only: kings belong on their back rank, near a corner
    fn king_shelter(board: &Board, color: Color, phase: GamePhase) -> i32 {
        if phase == GamePhase::Endgame {
            return 0;
        }
        let king = board.king_square(color);
        let back_rank = match color {
            Color::White => 0,
            Color::Black => 7,
        };
        let mut score = 0;
        if king.rank() != back_rank {
            score -= UNCASTLED_KING_PENALTY;
        }
        // 0 on the a/h files, 30 on d/e
        let centrality = 35 - (35 - 10 * king.file() as i32).abs();
        score - centrality
    }

    fn side_score(board: &Board, color: Color, phase: GamePhase) -> i32 {
        Self::material_and_placement(board, color, phase)
            + Self::mobility(board, color)
            + Self::doubled_pawns(board, color)
            + Self::king_shelter(board, color, phase)
    }
}

impl Evaluator for PieceSquareEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        let phase = game_phase(board);
        Self::side_score(board, Color::White, phase) - Self::side_score(board, Color::Black, phase)
    }
}

/// Evaluate with the default evaluator
pub fn evaluate(board: &Board) -> i32 {
    PieceSquareEvaluator.evaluate(board)
}
