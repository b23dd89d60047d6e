//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The moderation backend call failed.
    #[error("API error: {0}")]
    Api(#[from] modqueue_api::Error),
}

impl Error {
    /// The backend's human-readable description, if the error carries one.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Api(err) => err.description(),
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
