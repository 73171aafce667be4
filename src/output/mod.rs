//! Output writers for reports and event exports.
//!
//! This module handles writing data to disk in various formats:
//! - JSON trace reports (pretty)
//! - JSON-lines event streams

pub mod events;
pub mod json;
pub mod schema;

// Re-export main functions
pub use events::EventWriter;
pub use json::{read_report, write_report};
pub use schema::TraceReport;
