//! On-demand detail description of a single event.

use super::types::EventKind;
use crate::store::columns::column_text;
use crate::symbols::SymbolIndex;
use crate::utils::config::{
    ADDRESS_COLUMNS, EVENT_NOT_FOUND_DESCRIPTION, INSTRUCTION_TABLE, MEMORY_TABLE,
    UNKNOWN_EVENT_DESCRIPTION,
};
use crate::utils::hex::parse_hex_or_zero;
use log::debug;
use rusqlite::Connection;

/// Describe an event by re-reading its full row
///
/// **Public** - used by `TraceStore::describe_event`
///
/// Every column is rendered as `name: value` on its own line. Address
/// columns (`ip`, `addr`, `addr_end`) get a second line with the symbol they
/// resolve to:
///
/// ```text
/// ip: 401136
/// ip: main + 0x6
/// ```
///
/// Unknown-kind events and ids with no row produce fixed messages instead.
pub fn describe_event(
    conn: &Connection,
    symbols: &SymbolIndex,
    kind: EventKind,
    id: u64,
) -> rusqlite::Result<String> {
    let table = match kind {
        EventKind::Instruction => INSTRUCTION_TABLE,
        EventKind::MemRead | EventKind::MemWrite => MEMORY_TABLE,
        EventKind::MemUnknown => return Ok(UNKNOWN_EVENT_DESCRIPTION.to_string()),
    };

    // Row ids are signed in SQLite; anything larger cannot exist
    let Ok(rowid) = i64::try_from(id) else {
        return Ok(EVENT_NOT_FOUND_DESCRIPTION.to_string());
    };

    debug!("Describing {} event {}", kind, id);

    let mut stmt = conn.prepare(&format!("SELECT * FROM {table} WHERE rowid = ?1"))?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let mut rows = stmt.query([rowid])?;

    let Some(row) = rows.next()? else {
        return Ok(EVENT_NOT_FOUND_DESCRIPTION.to_string());
    };

    let mut description = String::new();
    for (index, name) in columns.iter().enumerate() {
        let value = column_text(row, index)?;
        description.push_str(&format!("{}: {}\n", name, value.as_deref().unwrap_or("")));

        if ADDRESS_COLUMNS.contains(&name.as_str()) {
            let resolved = value
                .as_deref()
                .map(|text| parse_hex_or_zero(name, Some(text)))
                .and_then(|addr| symbols.resolve(addr));

            match resolved {
                Some(resolved) => description.push_str(&format!("{}: {}\n", name, resolved)),
                None => description.push_str(&format!("{}: unknown\n", name)),
            }
        }
    }

    Ok(description)
}
