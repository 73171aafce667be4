//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while opening or querying a trace store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open trace database {path}: {source}")]
    OpenFailed {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Invalid database: {0} is not a recognized trace")]
    InvalidDatabase(String),

    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Event stream worker failed: {0}")]
    Worker(String),
}

/// Errors that can occur while parsing textual trace fields
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid hex value: {0:?}")]
    InvalidHex(String),

    #[error("Unknown event kind: {0}")]
    UnknownEventKind(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
