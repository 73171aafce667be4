//! Row counts of the three record tables.

use crate::utils::config::{BLOCK_TABLE, INSTRUCTION_TABLE, MEMORY_TABLE};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// Aggregate statistics of a trace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of basic block records
    pub block_count: u64,

    /// Number of executed instructions
    pub instruction_count: u64,

    /// Number of memory accesses
    pub memory_access_count: u64,
}

/// Count the rows of the block, instruction and memory tables
///
/// **Public** - used by `TraceStore::statistics`
pub fn query_statistics(conn: &Connection) -> rusqlite::Result<Statistics> {
    Ok(Statistics {
        block_count: count_rows(conn, BLOCK_TABLE)?,
        instruction_count: count_rows(conn, INSTRUCTION_TABLE)?,
        memory_access_count: count_rows(conn, MEMORY_TABLE)?,
    })
}

fn count_rows(conn: &Connection, table: &str) -> rusqlite::Result<u64> {
    let count: i64 = conn.query_row(&format!("SELECT count(*) FROM {table}"), [], |row| {
        row.get(0)
    })?;
    Ok(u64::try_from(count).unwrap_or(0))
}
