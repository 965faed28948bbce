//! Transposition Table
//!
//! Scores of searched positions keyed by Zobrist hash. Each slot holds one
//! entry and a store always overwrites it. The searcher clears the table at
//! the start of every move decision.

use tracing::trace;

use super::search::{MATE_SCORE, MAX_PLY};

/// How a stored score relates to the true value
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Bound {
    /// Searched with an open window
    Exact = 0,
    /// Fail high: true score >= stored score
    Lower = 1,
    /// Fail low: true score <= stored score
    Upper = 2,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TTEntry {
    /// Full hash for verification
    pub key: u64,
    pub score: i32,
    pub depth: i32,
    pub bound: Bound,
}

impl TTEntry {
    pub const EMPTY: TTEntry = TTEntry {
        key: 0,
        score: 0,
        depth: -1,
        bound: Bound::Exact,
    };

    /// Score usable at `depth` inside the window, if any
    pub fn cutoff(&self, depth: i32, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth < depth {
            return None;
        }
        match self.bound {
            Bound::Exact => Some(self.score),
            Bound::Lower if self.score >= beta => Some(self.score),
            Bound::Upper if self.score <= alpha => Some(self.score),
            _ => None,
        }
    }
}

pub struct TranspositionTable {
    entries: Vec<TTEntry>,
    mask: usize,
}

impl TranspositionTable {
    /// Create a table using at most `size_mb` megabytes
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<TTEntry>();
        let wanted = (size_mb.max(1) * 1024 * 1024) / entry_size;
        // Largest power of two that fits
        let size = 1usize << (usize::BITS - 1 - wanted.leading_zeros());
        trace!(size_mb, entries = size, "allocating transposition table");

        TranspositionTable {
            entries: vec![TTEntry::EMPTY; size],
            mask: size - 1,
        }
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    pub fn probe(&self, key: u64) -> Option<&TTEntry> {
        let entry = &self.entries[self.index(key)];
        (entry.key == key && entry.depth >= 0).then_some(entry)
    }

    pub fn store(&mut self, key: u64, depth: i32, score: i32, bound: Bound) {
        let idx = self.index(key);
        self.entries[idx] = TTEntry { key, score, depth, bound };
    }

    pub fn clear(&mut self) {
        self.entries.fill(TTEntry::EMPTY);
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Mate scores are stored relative to the node, not the root, so an entry
/// reached at a different ply still reports the right distance to mate.
pub fn score_to_tt(score: i32, ply: i32) -> i32 {
    if score >= MATE_SCORE - MAX_PLY {
        score + ply
    } else if score <= -(MATE_SCORE - MAX_PLY) {
        score - ply
    } else {
        score
    }
}

pub fn score_from_tt(score: i32, ply: i32) -> i32 {
    if score >= MATE_SCORE - MAX_PLY {
        score - ply
    } else if score <= -(MATE_SCORE - MAX_PLY) {
        score + ply
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_is_power_of_two() {
        let tt = TranspositionTable::new(1);
        assert!(tt.capacity().is_power_of_two());
        assert!(tt.capacity() * std::mem::size_of::<TTEntry>() <= 1024 * 1024);
    }

    #[test]
    fn test_store_probe_and_overwrite() {
        let mut tt = TranspositionTable::new(1);
        let key = 0xDEAD_BEEF_1234_5678;
        assert!(tt.probe(key).is_none());
        tt.store(key, 3, 42, Bound::Exact);
        assert_eq!(tt.probe(key).map(|e| e.score), Some(42));

        // Same slot, different key: always replaced
        let other = key ^ ((tt.capacity() as u64) << 1);
        tt.store(other, 1, -7, Bound::Upper);
        assert!(tt.probe(key).is_none());
        assert_eq!(tt.probe(other).map(|e| e.depth), Some(1));

        tt.clear();
        assert!(tt.probe(other).is_none());
    }

    #[test]
    fn test_cutoff_respects_depth_and_bound() {
        let exact = TTEntry { key: 1, score: 50, depth: 4, bound: Bound::Exact };
        assert_eq!(exact.cutoff(4, -100, 100), Some(50));
        assert_eq!(exact.cutoff(5, -100, 100), None);

        let lower = TTEntry { bound: Bound::Lower, ..exact };
        assert_eq!(lower.cutoff(2, 0, 40), Some(50));
        assert_eq!(lower.cutoff(2, 0, 60), None);

        let upper = TTEntry { bound: Bound::Upper, ..exact };
        assert_eq!(upper.cutoff(2, 60, 100), Some(50));
        assert_eq!(upper.cutoff(2, 10, 100), None);
    }

    #[test]
    fn test_mate_scores_are_ply_relative() {
        let mate_in_three_plies_from_root = MATE_SCORE - 5;
        let stored = score_to_tt(mate_in_three_plies_from_root, 2);
        assert_eq!(stored, MATE_SCORE - 3);
        assert_eq!(score_from_tt(stored, 4), MATE_SCORE - 7);
        assert_eq!(score_to_tt(120, 9), 120);
        assert_eq!(score_from_tt(-(MATE_SCORE - 2), 1), -(MATE_SCORE - 3));
    }
}
