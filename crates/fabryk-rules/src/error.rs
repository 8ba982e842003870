//! Error types for fabryk-rules.
//!
//! Compilation has exactly one failure mode, [`Error::WildcardOnly`]. The
//! remaining variants belong to the configuration and JSON helpers around the
//! compiler.

use thiserror::Error;

/// Result type alias for fabryk-rules operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fabryk-rules
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A free-text token made only of wildcard characters (`*`, `?`).
    ///
    /// Aborts the whole compile; no partial query document is produced.
    #[error("Wildcard-only search term '{token}' in value '{value}'")]
    WildcardOnly {
        /// The offending whitespace-separated token
        token: String,
        /// The full value the token came from
        value: String,
    },

    /// Invalid compiler configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new wildcard-only error.
    pub fn wildcard_only<T, V>(token: T, value: V) -> Self
    where
        T: Into<String>,
        V: Into<String>,
    {
        Error::WildcardOnly {
            token: token.into(),
            value: value.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Returns whether this error was caused by the search request itself.
    ///
    /// User errors should be reported back to whoever typed the search,
    /// everything else is a fault of the surrounding application.
    pub fn is_user_error(&self) -> bool {
        match self {
            Error::WildcardOnly { .. } => true,
            Error::Config { .. } => false,
            Error::Serialization(_) => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
