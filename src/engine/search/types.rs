//! Search limits, results, stats, and the scoring scale.

use std::time::Duration;

use crate::core::moves::Move;

pub const INFINITY: i32 = 1_000_000;
pub const MATE_SCORE: i32 = 100_000;
pub const DRAW_SCORE: i32 = 0;
/// Deepest ply a search can reach; bounds the mate-score band
pub const MAX_PLY: i32 = 128;

/// Per-call limits. Unset fields fall back to the searcher's config.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub depth: Option<u32>,
    /// Milliseconds
    pub movetime: Option<u64>,
    pub nodes: Option<u64>,
}

impl SearchLimits {
    pub fn depth(depth: u32) -> Self {
        SearchLimits {
            depth: Some(depth),
            ..Default::default()
        }
    }

    pub fn movetime(millis: u64) -> Self {
        SearchLimits {
            movetime: Some(millis),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub tt_hits: u64,
    pub tt_cutoffs: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// None only when the side to move has no legal move
    pub best_move: Option<Move>,
    /// Relative to the side to move
    pub score: i32,
    /// Last fully completed depth, 0 if none completed
    pub depth: u32,
    pub nodes: u64,
    /// A limit or the stop flag cut the search short
    pub stopped: bool,
    pub elapsed: Duration,
}

#[inline]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_SCORE - MAX_PLY
}

/// Score of being checkmated `ply` half-moves from the root
#[inline]
pub fn mated_in(ply: i32) -> i32 {
    -(MATE_SCORE - ply)
}

/// Full moves until mate, negative when the side to move is being mated
pub fn mate_distance(score: i32) -> Option<i32> {
    if !is_mate_score(score) {
        return None;
    }
    let plies = MATE_SCORE - score.abs();
    let moves = (plies + 1) / 2;
    Some(if score > 0 { moves } else { -moves })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mate_band() {
        assert!(is_mate_score(MATE_SCORE - 3));
        assert!(is_mate_score(mated_in(4)));
        assert!(!is_mate_score(900));
        assert!(MATE_SCORE - 1 > MATE_SCORE - 5);
    }

    #[test]
    fn test_mate_distance() {
        assert_eq!(mate_distance(MATE_SCORE - 1), Some(1));
        assert_eq!(mate_distance(MATE_SCORE - 3), Some(2));
        assert_eq!(mate_distance(mated_in(2)), Some(-1));
        assert_eq!(mate_distance(35), None);
    }
}
