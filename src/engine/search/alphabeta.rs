//! Negamax alpha-beta over the reversible board.

use crate::core::board::Board;
use crate::engine::eval::Evaluator;
use crate::engine::movegen::MoveGen;
use crate::engine::tt::{score_from_tt, score_to_tt, Bound, TTEntry};

use super::searcher::Searcher;
use super::types::{mated_in, DRAW_SCORE, INFINITY};

impl<E: Evaluator> Searcher<E> {
    /// Score of `board` for the side to move, searched `depth` plies deep.
    /// `sign` is +1 when white is to move, -1 otherwise. Returns 0 once a
    /// limit trips; callers must check `self.stopped` and discard it.
    pub(super) fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        sign: i32,
        ply: i32,
    ) -> i32 {
        if self.should_stop() {
            return 0;
        }
        self.stats.nodes += 1;

        let alpha_orig = alpha;
        let hash = board.hash();
        let use_tt = self.config.use_transposition_table;

        if use_tt {
            if let Some(entry) = self.tt.probe(hash) {
                self.stats.tt_hits += 1;
                let entry = TTEntry {
                    score: score_from_tt(entry.score, ply),
                    ..*entry
                };
                if let Some(score) = entry.cutoff(depth, alpha, beta) {
                    self.stats.tt_cutoffs += 1;
                    return score;
                }
            }
        }

        if depth <= 0 {
            return sign * self.evaluator.evaluate(board);
        }

        let moves = MoveGen::generate_legal_moves(board);
        if moves.is_empty() {
            return if board.is_in_check() { mated_in(ply) } else { DRAW_SCORE };
        }

        let mut best = -INFINITY;
        for &mv in moves.iter() {
            board.make_move(mv, true);
            let score = -self.alpha_beta(board, depth - 1, -beta, -alpha, -sign, ply + 1);
            board.unmake_move(mv, true);
            if self.stopped {
                return 0;
            }

            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        if use_tt {
            let bound = if best <= alpha_orig {
                Bound::Upper
            } else if best >= beta {
                Bound::Lower
            } else {
                Bound::Exact
            };
            self.tt.store(hash, depth, score_to_tt(best, ply), bound);
        }

        best
    }
}
