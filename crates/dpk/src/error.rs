//! Error types for partition key derivation.

use thiserror::Error;

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while deriving a partition key.
#[derive(Debug, Error)]
pub enum Error {
    /// The event (or its partition key) could not be rendered as JSON.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Deriver configuration rejected by `DeriverConfig::validate`.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// True if this error came from serializing the event.
    pub fn is_serialization(&self) -> bool {
        matches!(self, Error::Serialization(_))
    }
}
