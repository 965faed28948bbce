//! Zobrist hashing
//!
//! A position hash is the XOR of one key per (piece, square), a key when black
//! is to move, a key for the castling-rights value and a key for the
//! en-passant file value. Keys are generated from a fixed seed so hashes are
//! stable across runs.

use std::sync::OnceLock;

use super::game_state::CastlingRights;
use super::piece::{PIECE_TAGS, Piece};
use super::square::Square;

pub struct ZobristKeys {
    // [piece tag][square]; row 0 (no piece) stays zero
    pieces: [[u64; 64]; PIECE_TAGS],
    side: u64,
    castling: [u64; 16],
    // [file + 1]; index 0 means "no en-passant file" and is zero
    en_passant: [u64; 9],
}

const SEED: u64 = 29_426_028;

impl ZobristKeys {
    pub fn instance() -> &'static ZobristKeys {
        static KEYS: OnceLock<ZobristKeys> = OnceLock::new();
        KEYS.get_or_init(ZobristKeys::generate)
    }

    fn generate() -> Self {
        let mut rng = SplitMix64::new(SEED);

        let mut pieces = [[0u64; 64]; PIECE_TAGS];
        for row in pieces.iter_mut().skip(1) {
            for key in row.iter_mut() {
                *key = rng.next();
            }
        }

        let side = rng.next();

        let mut castling = [0u64; 16];
        for key in castling.iter_mut() {
            *key = rng.next();
        }

        let mut en_passant = [0u64; 9];
        for key in en_passant.iter_mut().skip(1) {
            *key = rng.next();
        }

        ZobristKeys { pieces, side, castling, en_passant }
    }

    #[inline]
    pub fn piece(&self, piece: Piece, sq: Square) -> u64 {
        self.pieces[piece.index()][sq.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> u64 {
        self.side
    }

    #[inline]
    pub fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling[rights.raw() as usize]
    }

    /// Key for an en-passant file value (0 = none, else file + 1)
    #[inline]
    pub fn en_passant(&self, file_value: u8) -> u64 {
        self.en_passant[file_value as usize]
    }
}

/// splitmix64: small, fast and good enough to spread key bits
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        SplitMix64 { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_empty_slots_are_zero() {
        let keys = ZobristKeys::instance();
        assert_eq!(keys.en_passant(0), 0);
        assert_eq!(keys.piece(Piece::NONE, Square::E1), 0);
    }

    #[test]
    fn test_keys_are_distinct() {
        let keys = ZobristKeys::instance();
        let mut seen = HashSet::new();
        for piece in Piece::all() {
            for sq in Square::all() {
                assert!(seen.insert(keys.piece(piece, sq)));
            }
        }
        assert!(seen.insert(keys.side_to_move()));
        for rights in 0..16 {
            assert!(seen.insert(keys.castling(CastlingRights::new(rights))));
        }
        for file in 1..9 {
            assert!(seen.insert(keys.en_passant(file)));
        }
    }
}
