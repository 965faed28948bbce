//! Move-choosing agents behind one trait.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::core::board::Board;
use crate::core::moves::Move;
use crate::engine::movegen::MoveGen;
use crate::engine::search::{SearchLimits, SearchResult, Searcher};

pub trait Agent {
    fn name(&self) -> &str;

    /// Pick a move for the side to move, or None if there is no legal move.
    /// The board must come back unchanged.
    fn choose_move(&mut self, board: &mut Board, limits: &SearchLimits) -> Option<Move>;

    /// Called before the first move of a new game
    fn new_game(&mut self) {}
}

/// Plays a uniformly random legal move
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(seed: Option<u64>) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed.unwrap_or_else(rand::random)),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, board: &mut Board, _limits: &SearchLimits) -> Option<Move> {
        let moves = MoveGen::generate_legal_moves(board);
        moves.as_slice().choose(&mut self.rng).copied()
    }
}

/// Plays the searcher's choice
pub struct AlphaBetaAgent {
    searcher: Searcher,
    last: Option<SearchResult>,
}

impl AlphaBetaAgent {
    pub fn new(config: SearchConfig) -> Self {
        AlphaBetaAgent {
            searcher: Searcher::new(config),
            last: None,
        }
    }

    /// Result of the most recent search
    pub fn last_result(&self) -> Option<&SearchResult> {
        self.last.as_ref()
    }
}

impl Agent for AlphaBetaAgent {
    fn name(&self) -> &str {
        "alphabeta"
    }

    fn choose_move(&mut self, board: &mut Board, limits: &SearchLimits) -> Option<Move> {
        let result = self.searcher.choose_move(board, limits);
        let best = result.best_move;
        self.last = Some(result);
        best
    }

    fn new_game(&mut self) {
        self.searcher.clear();
        self.last = None;
    }
}

/// Agent selection as it appears in config files
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Random,
    #[default]
    AlphaBeta,
}

impl AgentKind {
    pub fn build(&self, search: &SearchConfig) -> Box<dyn Agent> {
        match self {
            AgentKind::Random => Box::new(RandomAgent::new(search.seed)),
            AgentKind::AlphaBeta => Box::new(AlphaBetaAgent::new(search.clone())),
        }
    }
}
