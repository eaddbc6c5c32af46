//! Error handling for the iqcast pipeline
//!
//! A single error type covers every fallible operation in the crate: I/O on
//! the input stream, configuration validation, byte-level format problems,
//! and socket setup. The DSP blocks themselves never fail at runtime.

use std::io;

use thiserror::Error;

/// A specialized Result type for iqcast operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for iqcast operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (stdin reads, socket creation)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid or misaligned IQ byte stream
    #[error("format error: {0}")]
    Format(String),

    /// Network setup error
    #[error("network error: {0}")]
    Net(String),
}

// Helper constructors for common error scenarios

impl Error {
    /// Create a configuration error with a custom message
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a format error with a custom message
    pub fn format<S: Into<String>>(msg: S) -> Self {
        Error::Format(msg.into())
    }

    /// Create a network error with a custom message
    pub fn net<S: Into<String>>(msg: S) -> Self {
        Error::Net(msg.into())
    }
}
