//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort parsing of a single trace file
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to open trace {}: {source}", .path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read trace: {0}")]
    ReadFailed(#[from] std::io::Error),
}

/// Problems with a single trace line.
///
/// These never escape the parser: the offending line is logged and skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("'{command}' needs at least {expected} fields, found {found}")]
    TooFewFields {
        command: char,
        expected: usize,
        found: usize,
    },

    #[error("Invalid {field} value: '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error("Allocating {size} bytes overflows the live byte count ({allocated} bytes)")]
    ByteCountOverflow { size: u64, allocated: u64 },
}

/// Errors that can occur during report output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
