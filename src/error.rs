//! Error types.
//!
//! Illegal moves are not errors: the engine rejects them silently and the
//! selector flags them. The variants here cover contract violations,
//! malformed console input and persistence failures.

use std::path::PathBuf;

use crate::core::Position;
use crate::selection::Phase;

/// Errors raised by the engine and the move selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("position out of bounds: {position}")]
    OutOfBounds { position: Position },

    #[error("cannot {operation} in phase {phase:?}")]
    InvalidState {
        operation: &'static str,
        phase: Phase,
    },

    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
}

/// Errors from parsing a console move of the form `<row> <col>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected two numbers \"<row> <col>\", got {count} token(s) in {input:?}")]
    WrongTokenCount { input: String, count: usize },

    #[error("{token:?} in {input:?} is not a non-negative number")]
    NotANumber { input: String, token: String },
}

/// Errors from the score store and game snapshots.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", path.display())]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot encoding error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("snapshot is inconsistent: {0}")]
    Game(#[from] GameError),
}
