//! Leaf-node counting over the legal move tree.

use crate::core::board::Board;
use crate::core::moves::Move;
use crate::engine::movegen::MoveGen;

/// Number of leaf positions `depth` plies below `board`
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    let moves = MoveGen::generate_legal_moves(board);
    if depth <= 1 {
        return if depth == 0 { 1 } else { moves.len() as u64 };
    }

    let mut nodes = 0;
    for &mv in moves.iter() {
        board.make_move(mv, true);
        nodes += perft(board, depth - 1);
        board.unmake_move(mv, true);
    }
    nodes
}

/// Per-root-move leaf counts, in generation order
pub fn perft_divide(board: &mut Board, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let moves = MoveGen::generate_legal_moves(board);
    moves
        .iter()
        .map(|&mv| {
            board.make_move(mv, true);
            let nodes = perft(board, depth - 1);
            board.unmake_move(mv, true);
            (mv, nodes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shallow_start_counts() {
        let mut board = Board::start_position();
        assert_eq!(perft(&mut board, 0), 1);
        assert_eq!(perft(&mut board, 1), 20);
        assert_eq!(perft(&mut board, 2), 400);
        assert_eq!(board, Board::start_position());
    }

    #[test]
    fn test_divide_sums_to_perft() {
        let mut board = Board::start_position();
        let divide = perft_divide(&mut board, 3);
        assert_eq!(divide.len(), 20);
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 8902);
    }
}
