//! Search: iterative deepening over a negamax alpha-beta core.

mod alphabeta;
mod searcher;
mod types;

pub use searcher::Searcher;
pub use types::{
    is_mate_score, mate_distance, mated_in, SearchLimits, SearchResult, SearchStats, DRAW_SCORE,
    INFINITY, MATE_SCORE, MAX_PLY,
};
