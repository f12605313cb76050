//! Error types for the qlearner crate

use thiserror::Error;

use crate::types::Action;

/// Main error type for the qlearner crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("no value stored for action {action} in state {state}")]
    UninitializedValue { state: String, action: Action },

    #[error("state {state} offers no legal actions")]
    NoLegalActions { state: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("action {action} is not legal in the current position")]
    IllegalAction { action: Action },

    #[error("scripted environment has no observations left")]
    EnvironmentExhausted,

    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("failed to lock shared agent '{name}'")]
    LockPoisoned { name: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
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
