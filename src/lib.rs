pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod notation;

pub use crate::config::{EngineConfig, MatchConfig, SearchConfig};
pub use crate::core::{Board, GameOutcome, Move, Square};
pub use crate::engine::{Agent, AgentKind, MoveGen, SearchLimits, SearchResult, Searcher};
pub use crate::error::{Error, Result};
