//! Trace format probe.
//!
//! A database is accepted as a trace when its `info` table holds either the
//! current or the legacy tool version key. The value itself is not checked.

use crate::utils::config::{INFO_TABLE, VERSION_KEYS};
use log::debug;
use rusqlite::Connection;

/// Check whether the connection points at a recognized trace
///
/// **Public** - called by `TraceStore::open` before any other query
///
/// # Errors
/// Any SQLite failure while probing (missing `info` table, file that is not
/// a database). Callers treat those the same as a failed probe.
pub fn has_version_key(conn: &Connection) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare(&format!("SELECT value FROM {INFO_TABLE} WHERE key = ?1"))?;

    for key in VERSION_KEYS {
        if stmt.exists([*key])? {
            debug!("Found version key {}", key);
            return Ok(true);
        }
    }

    Ok(false)
}
