//! Error types and handling for the throughput log
//!
//! This module defines all error types used throughout the crate and how
//! they map onto process exit codes.

use thiserror::Error;

/// Main result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the throughput log
#[derive(Error, Debug)]
pub enum Error {
    /// Too few positional values on the command line
    #[error("Expected at least {expected} arguments (five values and a destination), got {actual}")]
    Arity {
        /// Number of positional values required
        expected: usize,
        /// Number of positional values supplied
        actual: usize,
    },

    /// Destination selector was neither `cuda` nor `cpu`
    #[error("Unrecognized destination '{0}' (expected 'cuda' or 'cpu')")]
    UnknownDestination(String),

    /// A field could not be represented as UTF-8 text
    #[error("Argument {position} is not valid UTF-8 text")]
    Encoding {
        /// 1-indexed position of the offending argument
        position: usize,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from std
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Check if this error was caused by how the tool was invoked
    /// rather than by the filesystem
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Error::Arity { .. }
                | Error::UnknownDestination(_)
                | Error::Encoding { .. }
                | Error::InvalidInput(_)
                | Error::Config(_)
        )
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        if self.is_usage_error() {
            2
        } else {
            1
        }
    }
}
