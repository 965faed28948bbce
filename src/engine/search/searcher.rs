//! Searcher: iterative deepening driver, time/node limits, and search entry point.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::core::board::Board;
use crate::core::moves::Move;
use crate::engine::eval::{Evaluator, PieceSquareEvaluator};
use crate::engine::movegen::MoveGen;
use crate::engine::tt::TranspositionTable;

use super::types::{
    is_mate_score, mated_in, SearchLimits, SearchResult, SearchStats, DRAW_SCORE, INFINITY, MAX_PLY,
};

pub struct Searcher<E: Evaluator = PieceSquareEvaluator> {
    pub(super) config: SearchConfig,
    pub(super) evaluator: E,
    pub(super) tt: TranspositionTable,
    pub(super) stats: SearchStats,
    pub(super) stop: Arc<AtomicBool>,
    /// Latched once any limit trips during the current call
    pub(super) stopped: bool,
    pub(super) start_time: Instant,
    pub(super) time_limit: Option<Duration>,
    pub(super) node_limit: Option<u64>,
    rng: StdRng,
}

impl Searcher<PieceSquareEvaluator> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_evaluator(config, PieceSquareEvaluator)
    }
}

impl<E: Evaluator> Searcher<E> {
    pub fn with_evaluator(config: SearchConfig, evaluator: E) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Searcher {
            tt: TranspositionTable::new(config.hash_size_mb),
            evaluator,
            stats: SearchStats::default(),
            stop: Arc::new(AtomicBool::new(false)),
            stopped: false,
            start_time: Instant::now(),
            time_limit: None,
            node_limit: None,
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Shared flag; storing `true` aborts the running search at the next node
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }

    pub fn clear(&mut self) {
        self.tt.clear();
        self.stats = SearchStats::default();
    }

    pub(super) fn should_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        let tripped = self.stop.load(Ordering::Relaxed)
            || self.node_limit.is_some_and(|limit| self.stats.nodes >= limit)
            || self.time_limit.is_some_and(|limit| self.start_time.elapsed() >= limit);
        self.stopped = tripped;
        tripped
    }

    /// Pick a move for the side to move on `board`. The board is searched in
    /// place and handed back in the state it arrived in.
    pub fn choose_move(&mut self, board: &mut Board, limits: &SearchLimits) -> SearchResult {
        self.stop.store(false, Ordering::Relaxed);
        self.start_time = Instant::now();
        self.stats = SearchStats::default();
        self.stopped = false;
        self.tt.clear();
        self.time_limit = limits
            .movetime
            .or(self.config.time_limit_ms)
            .map(Duration::from_millis);
        self.node_limit = limits.nodes;
        let max_depth = limits
            .depth
            .unwrap_or(self.config.max_depth)
            .clamp(1, MAX_PLY as u32 - 1) as i32;

        let mut root_moves = MoveGen::generate_legal_moves(board).to_vec();
        if root_moves.is_empty() {
            let score = if board.is_in_check() { mated_in(0) } else { DRAW_SCORE };
            return self.finish(None, score, 0);
        }
        root_moves.shuffle(&mut self.rng);

        let mut best_move = None;
        let mut best_score = -INFINITY;
        let mut completed = 0;

        for depth in 1..=max_depth {
            let Some((mv, score)) = self.search_root(board, &mut root_moves, depth) else {
                break;
            };
            best_move = Some(mv);
            best_score = score;
            completed = depth as u32;
            debug!(
                depth,
                score,
                nodes = self.stats.nodes,
                best = %mv,
                "completed iteration"
            );

            // A proven mate cannot change with more depth
            if is_mate_score(score) {
                break;
            }
        }

        if best_move.is_none() {
            warn!(
                elapsed_ms = self.start_time.elapsed().as_millis() as u64,
                "search stopped before depth 1 completed, playing first root move"
            );
            best_move = root_moves.first().copied();
            best_score = 0;
        }

        self.finish(best_move, best_score, completed)
    }

    /// One root iteration. Returns None when a limit cut it short. The best
    /// move is moved to the front so the next depth tries it first.
    fn search_root(&mut self, board: &mut Board, root_moves: &mut [Move], depth: i32) -> Option<(Move, i32)> {
        let sign = board.side_to_move().sign();
        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best: Option<(usize, i32)> = None;

        for (index, &mv) in root_moves.iter().enumerate() {
            if self.should_stop() {
                return None;
            }
            board.make_move(mv, true);
            let score = -self.alpha_beta(board, depth - 1, -beta, -alpha, -sign, 1);
            board.unmake_move(mv, true);
            if self.stopped {
                return None;
            }

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
            alpha = alpha.max(score);
        }

        let (index, score) = best?;
        root_moves[..=index].rotate_right(1);
        Some((root_moves[0], score))
    }

    fn finish(&self, best_move: Option<Move>, score: i32, depth: u32) -> SearchResult {
        let elapsed = self.start_time.elapsed();
        info!(
            best = %best_move.map(|mv| mv.to_uci()).unwrap_or_else(|| "none".to_string()),
            score,
            depth,
            nodes = self.stats.nodes,
            tt_hits = self.stats.tt_hits,
            tt_cutoffs = self.stats.tt_cutoffs,
            elapsed_ms = elapsed.as_millis() as u64,
            "search finished"
        );
        SearchResult {
            best_move,
            score,
            depth,
            nodes: self.stats.nodes,
            stopped: self.stopped,
            elapsed,
        }
    }
}

impl Default for Searcher<PieceSquareEvaluator> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
