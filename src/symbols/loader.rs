//! Load the symbol table of a trace into a `SymbolIndex`.

use super::index::{Symbol, SymbolIndex};
use crate::store::columns::column_text;
use crate::utils::config::{ANONYMOUS_SYMBOL_PREFIX, SYMBOL_TABLE};
use crate::utils::hex::parse_hex_or_zero;
use log::{debug, info};
use rusqlite::{Connection, Row};

/// Read every symbol row and index the global ones
///
/// **Public** - used by `TraceStore::load_symbols`
///
/// Anonymous symbols are named `unk_0`, `unk_1`, ... in row order. Hex
/// columns that fail to parse read as `0` (logged as a warning).
pub fn load_symbols(conn: &Connection) -> rusqlite::Result<SymbolIndex> {
    let mut stmt = conn.prepare(&format!(
        "SELECT path, name, value, size, base, global FROM {SYMBOL_TABLE}"
    ))?;
    let mut rows = stmt.query([])?;

    let mut anonymous = 0usize;
    let mut symbols = Vec::new();

    while let Some(row) = rows.next()? {
        let symbol = parse_symbol_row(row, &mut anonymous)?;
        debug!(
            "Symbol {} addr=0x{:x} value=0x{:x} size=0x{:x} offset=0x{:x} global={}",
            symbol.name, symbol.addr, symbol.value, symbol.size, symbol.offset, symbol.global
        );
        symbols.push(symbol);
    }

    let parsed = symbols.len();
    let index = SymbolIndex::from_symbols(symbols);
    info!("Indexed {} global symbols ({} rows)", index.len(), parsed);

    Ok(index)
}

fn parse_symbol_row(row: &Row<'_>, anonymous: &mut usize) -> rusqlite::Result<Symbol> {
    let path = column_text(row, 0)?.unwrap_or_default();
    let name = match column_text(row, 1)? {
        Some(name) if !name.is_empty() => name,
        _ => {
            let name = format!("{}{}", ANONYMOUS_SYMBOL_PREFIX, anonymous);
            *anonymous += 1;
            name
        }
    };

    let value = parse_hex_or_zero("value", column_text(row, 2)?.as_deref());
    let size = parse_hex_or_zero("size", column_text(row, 3)?.as_deref());
    let offset = parse_hex_or_zero("base", column_text(row, 4)?.as_deref());
    let global = parse_hex_or_zero("global", column_text(row, 5)?.as_deref()) == 1;

    Ok(Symbol::new(path, name, value, size, offset, global))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym_db(rows: &[(&str, &str, &str, &str, &str, &str)]) -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE sym (path TEXT, name TEXT, value TEXT, size TEXT, base TEXT, global TEXT)",
            [],
        )
        .unwrap();
        for (path, name, value, size, base, global) in rows {
            conn.execute(
                "INSERT INTO sym (path, name, value, size, base, global) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                [path, name, value, size, base, global],
            )
            .unwrap();
        }
        conn
    }

    #[test]
    fn test_anonymous_symbols_named_in_row_order() {
        let conn = sym_db(&[
            ("/bin/app", "", "10", "4", "0", "1"),
            ("/bin/app", "foo", "20", "4", "0", "1"),
        ]);

        let index = load_symbols(&conn).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(0x10).unwrap().name, "unk_0");
        assert_eq!(index.get(0x20).unwrap().name, "foo");

        let resolved = index.resolve(0x15).unwrap();
        assert_eq!(resolved.symbol.name, "unk_0");
        assert_eq!(resolved.offset, 0x5);
    }

    #[test]
    fn test_counter_follows_rows_not_addresses() {
        let conn = sym_db(&[
            ("a", "", "300", "0", "0", "1"),
            ("a", "", "100", "0", "0", "0"),
            ("a", "", "200", "0", "0", "1"),
        ]);

        let index = load_symbols(&conn).unwrap();
        // The non-global row still consumes a sequence number
        assert_eq!(index.get(0x300).unwrap().name, "unk_0");
        assert_eq!(index.get(0x200).unwrap().name, "unk_2");
        assert!(index.get(0x100).is_none());
    }

    #[test]
    fn test_base_is_added_to_value() {
        let conn = sym_db(&[("libc.so", "puts", "80", "20", "7f0000000000", "1")]);

        let index = load_symbols(&conn).unwrap();
        let symbol = index.get(0x7f00_0000_0080).unwrap();
        assert_eq!(symbol.value, 0x80);
        assert_eq!(symbol.size, 0x20);
        assert_eq!(symbol.offset, 0x7f00_0000_0000);
    }

    #[test]
    fn test_malformed_hex_reads_as_zero() {
        let conn = sym_db(&[("a", "broken", "zz", "1", "0", "1")]);

        let index = load_symbols(&conn).unwrap();
        assert_eq!(index.get(0).unwrap().name, "broken");
    }
}
