//! Error types for the advisor crate

use thiserror::Error;

/// Main error type for the advisor crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("board exhausted: all {revealed} cells are already revealed")]
    ExhaustedBoard { revealed: usize },

    #[error("cell {cell} is out of bounds (must be 1-25)")]
    InvalidCell { cell: usize },

    #[error("invalid game record at index {index}: {reason}")]
    InvalidGameRecord { index: usize, reason: String },

    #[error("advisor state lock was poisoned by a panicking holder")]
    StatePoisoned,

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
