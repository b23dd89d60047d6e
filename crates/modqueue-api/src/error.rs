//! Error types for the API client.

use thiserror::Error;

/// Errors that can occur while talking to the moderation backend.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (connection, TLS, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    ///
    /// `description` carries the backend's human-readable error
    /// description when the error body contained one.
    #[error("Backend error ({status}): {}", description.as_deref().unwrap_or("no description"))]
    Backend {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Human-readable description from the error body, if any.
        description: Option<String>,
    },

    /// A response body did not match the expected shape.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl Error {
    /// The human-readable description of this error, if it carries one.
    ///
    /// Used by consumers that surface errors to a UI channel and need to
    /// distinguish "the backend said why" from "no idea".
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Backend { description, .. } => description.as_deref(),
            _ => None,
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
