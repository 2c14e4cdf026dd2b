//! Error types for the roshambo crate

use thiserror::Error;

/// Main error type for the roshambo crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move '{input}' (expected rock, paper or scissors)")]
    InvalidMove { input: String },

    #[error("insufficient data: need {required} recorded moves, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("invalid response distribution: {reason}")]
    InvalidDistribution { reason: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("model state mismatch: expected {expected} parameters, found {found}")]
    ModelMismatch { expected: String, found: String },

    #[error("unsupported {piece} format version {found} (expected {expected})")]
    UnsupportedVersion {
        piece: String,
        found: u32,
        expected: u32,
    },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Whether this error came from reading or writing persisted state.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Error::Io { .. } | Error::SerializationContext { .. } | Error::UnsupportedVersion { .. }
        )
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
