//! Typed column readers with SQLite's text/integer coercion rules.
//!
//! Trace tools are not consistent about column affinity (a `size` may be an
//! INTEGER in one trace and TEXT in another), so readers go through
//! `ValueRef` instead of asking rusqlite for a fixed Rust type.

use log::warn;
use rusqlite::types::ValueRef;
use rusqlite::Row;

/// Read a column as text. NULL becomes `None`, numbers are formatted in decimal.
pub(crate) fn column_text(row: &Row<'_>, index: usize) -> rusqlite::Result<Option<String>> {
    Ok(match row.get_ref(index)? {
        ValueRef::Null => None,
        ValueRef::Integer(value) => Some(value.to_string()),
        ValueRef::Real(value) => Some(value.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    })
}

/// Read a column as an unsigned integer.
///
/// NULL, negative and non-numeric values read as `0`.
pub(crate) fn column_u64(row: &Row<'_>, index: usize) -> rusqlite::Result<u64> {
    Ok(match row.get_ref(index)? {
        ValueRef::Integer(value) => u64::try_from(value).unwrap_or(0),
        ValueRef::Real(value) if value >= 0.0 => value as u64,
        ValueRef::Text(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            text.trim().parse::<u64>().unwrap_or_else(|_| {
                warn!("Column {} holds non-numeric text {:?}, using 0", index, text);
                0
            })
        }
        _ => 0,
    })
}
