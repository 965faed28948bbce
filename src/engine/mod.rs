//! Engine components built on the core board:
//! - Legal move generation and perft
//! - Static evaluation
//! - Negamax alpha-beta search with a transposition table
//! - Agents and self-play

pub mod agent;
pub mod eval;
pub mod movegen;
pub mod perft;
pub mod search;
pub mod selfplay;
pub mod tt;

pub use agent::{Agent, AgentKind, AlphaBetaAgent, RandomAgent};
pub use eval::{evaluate, Evaluator, GamePhase, PieceSquareEvaluator};
pub use movegen::MoveGen;
pub use perft::{perft, perft_divide};
pub use search::{SearchLimits, SearchResult, SearchStats, Searcher, INFINITY, MATE_SCORE};
pub use selfplay::{play_game, GameRecord};
pub use tt::{Bound, TTEntry, TranspositionTable};
