//! Error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("malformed FEN '{fen}': {reason}")]
    Syntax { fen: String, reason: String },

    #[error("illegal position '{fen}': {reason}")]
    IllegalPosition { fen: String, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("malformed move '{0}'")]
    Malformed(String),

    #[error("move '{0}' is not legal in this position")]
    Illegal(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("search depth {depth} outside 1..={max}")]
    DepthOutOfRange { depth: u32, max: u32 },

    #[error("invalid start position: {0}")]
    StartPosition(#[from] FenError),
}

/// Crate-level error
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error(transparent)]
    Move(#[from] MoveParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
