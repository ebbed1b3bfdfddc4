//! Error types for record parsing and stream processing.

use std::io;

use thiserror::Error;

/// A single input line could not be turned into a [`Record`](crate::Record).
///
/// Recoverable: the line is decided `unauthorized` and processing continues.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The line is not syntactically valid JSON.
    #[error("{0}")]
    Syntax(#[from] serde_json::Error),

    /// The line is valid JSON but not an object.
    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// An attribute holds an array or object, which cannot be coerced to text.
    #[error("attribute '{attribute}' holds a nested value")]
    NestedValue { attribute: String },

    /// The line is not valid UTF-8.
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// The input or output stream itself failed.
///
/// Fatal: processing stops and the process exits non-zero.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Reading the next line from the input failed.
    #[error("Error reading from stdin: {0}")]
    Read(#[source] io::Error),

    /// Writing a decision to the output failed.
    #[error("Error writing to stdout: {0}")]
    Write(#[source] io::Error),

    /// Writing a diagnostic to the error stream failed.
    #[error("Error writing to stderr: {0}")]
    Diagnostic(#[source] io::Error),
}

impl StreamError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Read(_) => 1,
            Self::Write(_) | Self::Diagnostic(_) => 2,
        }
    }
}

/// Result type for stream processing.
pub type Result<T> = std::result::Result<T, StreamError>;
