//! Error types for the word index
//!
//! Lookups never fail: "not found" is `None`. Errors only come from the
//! edges of the system (reading documents, configuration, CLI input).
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::config::ConfigError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for word index operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the word index
#[derive(Debug, Error)]
pub enum Error {
    /// A document could not be read
    #[error("{} could not be opened: {source}", path.display())]
    Io {
        /// Path of the document
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Malformed command input
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl Error {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
