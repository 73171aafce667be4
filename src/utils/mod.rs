//! Utility modules for configuration, error handling, and hex parsing.

pub mod config;
pub mod error;
pub mod hex;

// Re-export commonly used error types for convenience
pub use error::{OutputError, ParseError, StoreError};
pub use hex::{parse_hex, parse_hex_or_zero};
