//! Error types for fabryk-rules-cli

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for fabryk-rules-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fabryk-rules-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved, `-` for stdin/stdout
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Error from the compiler
    #[error(transparent)]
    Compile(#[from] fabryk_rules::Error),

    /// Invalid command-line configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Creates an I/O error for `path`.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }
}
