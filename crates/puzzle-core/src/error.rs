//! Error types for the puzzle engine

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::PuzzleKind;

/// Main error type for the puzzle engine
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("{kind} generation failed after {attempts} attempts")]
    GenerationExhausted { kind: PuzzleKind, attempts: usize },

    #[error("content unavailable at {}: {source}", path.display())]
    ContentUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("state space of {bound} keys is too large for a dense table")]
    StateSpaceTooLarge { bound: u64 },

    #[error("invalid optimal table entry '{entry}' at index {index}")]
    InvalidTableEntry { index: usize, entry: String },

    #[error("optimal table has {got} entries, expected {expected}")]
    TableSizeMismatch { expected: usize, got: usize },

    #[error("unknown puzzle '{0}'")]
    UnknownPuzzle(String),

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
