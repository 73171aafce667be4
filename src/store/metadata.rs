//! Descriptive key/value fields of a trace.

use super::columns::column_text;
use crate::utils::config::{ARCH_KEY, ARGS_KEY, INFO_TABLE, PROGRAM_KEYS, TOOL_VERSION_KEYS};
use rusqlite::{Connection, OptionalExtension, Statement};
use serde::{Deserialize, Serialize};

/// Trace metadata. Every field is `None` when its key is missing or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Version of the tool that recorded the trace
    pub tool_version: Option<String>,

    /// Target architecture
    pub arch: Option<String>,

    /// Traced program
    pub program: Option<String>,

    /// Arguments the program was run with
    pub args: Option<String>,
}

/// Read the metadata record
///
/// **Public** - used by `TraceStore::metadata`
///
/// For the tool version and program pairs, keys are looked up in order and
/// a later key overwrites an earlier one whenever its value is not NULL. An
/// empty later value therefore leaves the field `None`.
pub fn query_metadata(conn: &Connection) -> rusqlite::Result<Metadata> {
    let mut stmt = conn.prepare(&format!("SELECT value FROM {INFO_TABLE} WHERE key = ?1"))?;

    Ok(Metadata {
        tool_version: lookup_last_wins(&mut stmt, TOOL_VERSION_KEYS)?,
        arch: lookup(&mut stmt, ARCH_KEY)?,
        program: lookup_last_wins(&mut stmt, PROGRAM_KEYS)?,
        args: lookup(&mut stmt, ARGS_KEY)?,
    })
}

fn lookup(stmt: &mut Statement<'_>, key: &str) -> rusqlite::Result<Option<String>> {
    Ok(non_empty(lookup_raw(stmt, key)?))
}

/// Value of `key`, `None` when the row is missing or NULL. Empty text is kept.
fn lookup_raw(stmt: &mut Statement<'_>, key: &str) -> rusqlite::Result<Option<String>> {
    Ok(stmt
        .query_row([key], |row| column_text(row, 0))
        .optional()?
        .flatten())
}

/// Any non-NULL later value replaces an earlier one, even when empty.
fn lookup_last_wins(stmt: &mut Statement<'_>, keys: &[&str]) -> rusqlite::Result<Option<String>> {
    let mut found = None;
    for key in keys {
        if let Some(value) = lookup_raw(stmt, key)? {
            found = Some(value);
        }
    }
    Ok(non_empty(found))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
