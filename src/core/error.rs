//! Error types for the sculpting core

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Direction of a history navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Next => f.write_str("next"),
            Direction::Prev => f.write_str("previous"),
        }
    }
}

/// Main error type for the sculpting core
#[derive(Debug, Error)]
pub enum Error {
    #[error("Sample ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds { x: i64, y: i64, width: u32, height: u32 },

    #[error("There is no {0} state to enter")]
    NoSuchState(Direction),

    #[error("Edit history is empty")]
    EmptyHistory,

    #[error("State index {index} is out of range for a history of {len} entries")]
    InvalidStateIndex { index: usize, len: usize },

    #[error("An action is in progress")]
    ActionInProgress,

    #[error("Snapshot mismatch: {0}")]
    SnapshotMismatch(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Corrupt history data: {0}")]
    Corrupt(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Invalid history file name: {0:?}")]
    InvalidFileName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}
