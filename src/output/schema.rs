//! Output JSON schema for trace reports.
//!
//! Schema is versioned to allow future evolution.

use crate::store::{Metadata, Statistics};
use crate::utils::config::REPORT_SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Summary of a trace written by the `info` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace database the report describes
    pub trace_path: String,

    pub metadata: Metadata,

    pub statistics: Statistics,

    /// Number of indexed global symbols
    pub symbol_count: usize,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

impl TraceReport {
    /// Build a report stamped with the current time
    pub fn new(
        trace_path: impl Into<String>,
        metadata: Metadata,
        statistics: Statistics,
        symbol_count: usize,
    ) -> Self {
        Self {
            version: REPORT_SCHEMA_VERSION.to_string(),
            trace_path: trace_path.into(),
            metadata,
            statistics,
            symbol_count,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
