//! Engine configuration loaded from TOML.
//!
//! ```toml
//! [search]
//! max_depth = 5
//! time_limit_ms = 2000
//! hash_size_mb = 32
//!
//! [selfplay]
//! max_moves = 120
//! white = "alpha_beta"
//! black = "random"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::board::Board;
use crate::engine::agent::AgentKind;
use crate::error::ConfigError;

/// Deepest iterative-deepening target a config may request
pub const MAX_SEARCH_DEPTH: u32 = 32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_depth: u32,
    /// Per-move budget in milliseconds; unlimited when absent
    pub time_limit_ms: Option<u64>,
    pub hash_size_mb: usize,
    pub use_transposition_table: bool,
    /// Root move shuffling seed; random when absent
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: 4,
            time_limit_ms: None,
            hash_size_mb: 16,
            use_transposition_table: true,
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SEARCH_DEPTH).contains(&self.max_depth) {
            return Err(ConfigError::DepthOutOfRange {
                depth: self.max_depth,
                max: MAX_SEARCH_DEPTH,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Half-move cap for one game
    pub max_moves: u32,
    pub white: AgentKind,
    pub black: AgentKind,
    pub start_fen: Option<String>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            max_moves: 200,
            white: AgentKind::AlphaBeta,
            black: AgentKind::AlphaBeta,
            start_fen: None,
        }
    }
}

impl MatchConfig {
    /// Board the game starts from
    pub fn start_board(&self) -> Result<Board, ConfigError> {
        match &self.start_fen {
            Some(fen) => Ok(Board::from_fen(fen)?),
            None => Ok(Board::start_position()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub selfplay: MatchConfig,
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.search.validate()?;
        self.selfplay.start_board()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.search.max_depth, 4);
        assert_eq!(config.search.hash_size_mb, 16);
        assert!(config.search.use_transposition_table);
        assert_eq!(config.selfplay.max_moves, 200);
    }

    #[test]
    fn test_partial_tables() {
        let text = r#"
            [search]
            max_depth = 6
            time_limit_ms = 1500
            seed = 9

            [selfplay]
            black = "random"
            start_fen = "4k3/8/8/8/8/8/8/4K2R w K - 0 1"
        "#;
        let config = EngineConfig::from_toml_str(text).unwrap();
        assert_eq!(config.search.max_depth, 6);
        assert_eq!(config.search.time_limit_ms, Some(1500));
        assert_eq!(config.search.seed, Some(9));
        assert_eq!(config.selfplay.white, AgentKind::AlphaBeta);
        assert_eq!(config.selfplay.black, AgentKind::Random);
        assert!(config.selfplay.start_board().is_ok());
    }

    #[test]
    fn test_depth_out_of_range() {
        for depth in [0, MAX_SEARCH_DEPTH + 1] {
            let text = format!("[search]\nmax_depth = {depth}\n");
            assert!(matches!(
                EngineConfig::from_toml_str(&text),
                Err(ConfigError::DepthOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_bad_inputs() {
        assert!(matches!(
            EngineConfig::from_toml_str("[search]\nmax_depth = \"deep\"\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("[selfplay]\nstart_fen = \"not a fen\"\n"),
            Err(ConfigError::StartPosition(_))
        ));
        assert!(matches!(
            EngineConfig::load("/definitely/not/here.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
