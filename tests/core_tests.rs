//! Board Tests
//!
//! Make/unmake contract, incremental hashing, and game-end classification.

use negachess::core::board::Board;
use negachess::core::outcome::{GameOutcome, FIFTY_MOVE_PLIES};
use negachess::core::piece::Color;
use negachess::core::zobrist::ZobristKeys;
use negachess::engine::movegen::MoveGen;
use negachess::notation::{parse_move, to_fen};

const POSITIONS: [&str; 5] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbqkb1r/pp1p1ppp/5n2/2pPp3/8/8/PPP1PPPP/RNBQKBNR w KQkq e6 0 4",
];

fn play(board: &mut Board, moves: &[&str]) {
    for text in moves {
        let mv = parse_move(board, text).unwrap();
        board.make_move(mv, false);
    }
}

/// Every legal move, at every node to `depth`, is undone exactly
fn assert_make_unmake_inverse(board: &mut Board, depth: u32) {
    if depth == 0 {
        return;
    }
    let before = board.clone();
    for &mv in MoveGen::generate_legal_moves(board).iter() {
        board.make_move(mv, true);
        assert_eq!(board.hash(), board.compute_hash(), "hash drift after {mv}");
        assert_make_unmake_inverse(board, depth - 1);
        board.unmake_move(mv, true);
        assert_eq!(*board, before, "unmake {mv} did not restore the position");
        assert_eq!(board.is_in_check(), before.is_in_check());
    }
}

// ============================================================================
// Make / Unmake
// ============================================================================

#[test]
fn test_make_unmake_is_inverse() {
    for fen in POSITIONS {
        let mut board = Board::from_fen(fen).unwrap();
        assert_make_unmake_inverse(&mut board, 3);
    }
}

#[test]
fn test_game_moves_are_recorded_and_reverted() {
    let mut board = Board::start_position();
    play(&mut board, &["g1f3", "g8f6"]);
    assert_eq!(board.move_history().len(), 2);
    assert_eq!(board.undo_depth(), 2);
    assert_eq!(board.fullmove_number(), 2);

    let last = board.move_history()[1];
    board.unmake_move(last, false);
    assert_eq!(board.move_history().len(), 1);
    assert_eq!(board.side_to_move(), Color::Black);
}

#[test]
fn test_en_passant_capture_and_undo() {
    let mut board = Board::from_fen(POSITIONS[4]).unwrap();
    let before = board.clone();
    let mv = parse_move(&board, "d5e6").unwrap();
    assert!(mv.is_en_passant());

    board.make_move(mv, true);
    assert_eq!(to_fen(&board), "rnbqkb1r/pp1p1ppp/4Pn2/2p5/8/8/PPP1PPPP/RNBQKBNR b KQkq - 0 4");
    board.unmake_move(mv, true);
    assert_eq!(board, before);
}

#[test]
fn test_promotion_capture_and_undo() {
    let mut board = Board::from_fen("r3k2r/1P6/8/8/8/8/6p1/R3K2R w KQkq - 0 1").unwrap();
    let before = board.clone();
    let mv = parse_move(&board, "b7a8q").unwrap();
    board.make_move(mv, true);
    assert_eq!(to_fen(&board), "Q3k2r/8/8/8/8/8/6p1/R3K2R b KQk - 0 1");
    board.unmake_move(mv, true);
    assert_eq!(board, before);
}

// ============================================================================
// Hashing
// ============================================================================

#[test]
fn test_hash_consistent_through_sequences() {
    let mut board = Board::start_position();
    let start_hash = board.hash();
    let line = ["e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4", "f3d4", "g8f6", "b1c3", "a7a6", "f1e2", "e7e5"];
    let mut made = Vec::new();
    for text in line {
        let mv = parse_move(&board, text).unwrap();
        board.make_move(mv, true);
        made.push(mv);
        assert_eq!(board.hash(), board.compute_hash(), "after {text}");

        if !board.is_in_check() {
            let hash = board.hash();
            board.make_null_move();
            assert_eq!(board.hash(), board.compute_hash(), "null move after {text}");
            assert_ne!(board.hash(), hash);
            board.unmake_null_move();
            assert_eq!(board.hash(), hash);
        }
    }
    for mv in made.into_iter().rev() {
        board.unmake_move(mv, true);
        assert_eq!(board.hash(), board.compute_hash());
    }
    assert_eq!(board.hash(), start_hash);
}

#[test]
fn test_transposition_reaches_same_hash() {
    let mut a = Board::start_position();
    let mut b = Board::start_position();
    play(&mut a, &["g1f3", "g8f6", "b1c3", "b8c6"]);
    play(&mut b, &["b1c3", "b8c6", "g1f3", "g8f6"]);
    assert_eq!(a.hash(), b.hash());

    // Same placement, different en passant file
    let mut c = Board::start_position();
    let mut d = Board::start_position();
    play(&mut c, &["e2e4", "e7e5", "g1f3"]);
    play(&mut d, &["e2e3", "e7e5", "e3e4", "g8f6", "g1f3", "f6g8"]);
    assert_eq!(to_fen(&c).split(' ').next(), to_fen(&d).split(' ').next());
    assert_eq!(c.hash(), d.hash());
}

#[test]
fn test_side_to_move_changes_hash() {
    let white = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let black = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
    assert_eq!(white.hash() ^ black.hash(), ZobristKeys::instance().side_to_move());
}

// ============================================================================
// Outcome
// ============================================================================

#[test]
fn test_checkmate_outcome() {
    let mut board = Board::start_position();
    play(&mut board, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert_eq!(board.outcome(), GameOutcome::Checkmate { winner: Color::Black });
    assert_eq!(board.outcome().result_tag(), "0-1");
}

#[test]
fn test_stalemate_outcome() {
    let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(board.outcome(), GameOutcome::Stalemate);
    assert!(board.outcome().is_draw());
}

#[test]
fn test_threefold_repetition_outcome() {
    let mut board = Board::start_position();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    play(&mut board, &shuffle);
    assert_eq!(board.repetition_count(), 2);
    assert_eq!(board.outcome(), GameOutcome::Ongoing);
    play(&mut board, &shuffle);
    assert_eq!(board.repetition_count(), 3);
    assert_eq!(board.outcome(), GameOutcome::Repetition);
}

#[test]
fn test_pawn_move_resets_repetition() {
    let mut board = Board::start_position();
    play(&mut board, &["g1f3", "g8f6", "f3g1", "f6g8", "e2e4"]);
    assert_eq!(board.repetition_count(), 1);
}

#[test]
fn test_game_unmake_of_pawn_move_restores_board() {
    let mut board = Board::start_position();
    play(&mut board, &["g1f3", "g8f6"]);
    let before = board.clone();

    let mv = parse_move(&board, "e2e4").unwrap();
    board.make_move(mv, false);
    assert_eq!(board.repetition_count(), 1);
    board.unmake_move(mv, false);
    assert_eq!(board, before);
    assert_eq!(board.repetition_count(), 1);
}

#[test]
fn test_threefold_counts_positions_before_takeback() {
    let mut board = Board::start_position();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    play(&mut board, &shuffle);

    let mv = parse_move(&board, "e2e4").unwrap();
    board.make_move(mv, false);
    board.unmake_move(mv, false);
    assert_eq!(board.repetition_count(), 2);

    play(&mut board, &shuffle);
    assert_eq!(board.repetition_count(), 3);
    assert_eq!(board.outcome(), GameOutcome::Repetition);
}

#[test]
fn test_fifty_move_outcome() {
    let board = Board::from_fen(&format!("4k3/8/8/8/8/8/8/R3K3 w - - {FIFTY_MOVE_PLIES} 80")).unwrap();
    assert_eq!(board.outcome(), GameOutcome::FiftyMoveRule);
    let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80").unwrap();
    assert_eq!(board.outcome(), GameOutcome::Ongoing);
}

#[test]
fn test_insufficient_material_outcome() {
    for fen in [
        "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
        "4k3/8/8/8/8/8/8/4KN2 w - - 0 1",
        "4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1",
    ] {
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.outcome(), GameOutcome::InsufficientMaterial, "{fen}");
    }
    let opposite_bishops = Board::from_fen("4k1b1/8/8/8/8/8/8/2B1K3 w - - 0 1").unwrap();
    assert_eq!(opposite_bishops.outcome(), GameOutcome::Ongoing);
}
