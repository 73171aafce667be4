//! Shared trace fixtures for integration tests.

#![allow(dead_code)]

use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;

/// A trace database on disk, removed when dropped
pub struct TraceFixture {
    _dir: TempDir,
    pub path: PathBuf,
}

const SCHEMA: &str = "
    CREATE TABLE info (key TEXT PRIMARY KEY, value TEXT);
    CREATE TABLE bbl (addr TEXT, addr_end TEXT, size INTEGER, thread_id INTEGER);
    CREATE TABLE ins (bbl_id INTEGER, ip TEXT, dis TEXT, op TEXT);
    CREATE TABLE mem (ins_id INTEGER, ip TEXT, type TEXT, addr TEXT, size INTEGER, data TEXT);
    CREATE TABLE sym (path TEXT, name TEXT, value TEXT, size TEXT, base TEXT, global TEXT);
";

/// Four instructions, three memory accesses and a handful of symbols
///
/// Logical order:
/// `W(1) I(1) I(2) R(2) I(3) R(3) I(4)`
const SAMPLE: &str = "
    INSERT INTO info (key, value) VALUES ('TRACERGRIND_VERSION', '0.8.1');
    INSERT INTO info (key, value) VALUES ('ARCH', 'amd64');
    INSERT INTO info (key, value) VALUES ('PROGRAM', '/bin/app');
    INSERT INTO info (key, value) VALUES ('ARGS', '--fast input.txt');

    INSERT INTO bbl (addr, addr_end, size, thread_id) VALUES ('401000', '401007', 7, 1);
    INSERT INTO bbl (addr, addr_end, size, thread_id) VALUES ('401010', '401011', 1, 1);

    INSERT INTO ins (bbl_id, ip, dis, op) VALUES (1, '401000', 'push rbp', '55');
    INSERT INTO ins (bbl_id, ip, dis, op) VALUES (1, '401001', 'mov rbp, rsp', '4889e5');
    INSERT INTO ins (bbl_id, ip, dis, op) VALUES (1, '401004', 'mov eax, [rbp+8]', '8b4508');
    INSERT INTO ins (bbl_id, ip, dis, op) VALUES (2, '401010', 'ret', 'c3');

    INSERT INTO mem (ins_id, ip, type, addr, size, data) VALUES (1, '401000', 'W', '7ffc0000', 8, '0');
    INSERT INTO mem (ins_id, ip, type, addr, size, data) VALUES (3, '401004', 'R', '601010', 4, '2a');
    INSERT INTO mem (ins_id, ip, type, addr, size, data) VALUES (4, '401010', 'R', '7ffc0008', 8, '401234');

    INSERT INTO sym (path, name, value, size, base, global) VALUES ('/bin/app', 'main', '401000', '10', '0', '1');
    INSERT INTO sym (path, name, value, size, base, global) VALUES ('/bin/app', 'helper', '401010', '20', '0', '1');
    INSERT INTO sym (path, name, value, size, base, global) VALUES ('/bin/app', 'local_static', '401008', '4', '0', '0');
    INSERT INTO sym (path, name, value, size, base, global) VALUES ('/bin/app', 'table', '601000', '100', '0', '1');
    INSERT INTO sym (path, name, value, size, base, global) VALUES ('/lib/libc.so', '', '1000', '8', '7f0000000000', '1');
";

impl TraceFixture {
    /// Create a trace from raw SQL
    pub fn from_sql(sql: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(sql).unwrap();
        drop(conn);

        Self { _dir: dir, path }
    }

    /// Empty tables with a valid version key
    pub fn empty() -> Self {
        Self::from_sql(&format!(
            "{SCHEMA} INSERT INTO info (key, value) VALUES ('TRACERGRIND_VERSION', '0.8.1');"
        ))
    }

    /// The sample trace described above
    pub fn sample() -> Self {
        Self::from_sql(&format!("{SCHEMA}{SAMPLE}"))
    }

    /// A long straight-line trace: `count` instructions, one read each
    pub fn long(count: usize) -> Self {
        let mut sql = format!(
            "{SCHEMA} INSERT INTO info (key, value) VALUES ('TRACERGRIND_VERSION', '0.8.1');"
        );
        sql.push_str("BEGIN;");
        for i in 1..=count {
            sql.push_str(&format!(
                "INSERT INTO ins (bbl_id, ip, dis, op) VALUES (1, '{:x}', 'nop', '90');
                 INSERT INTO mem (ins_id, ip, type, addr, size, data) VALUES ({}, '{:x}', 'R', '{:x}', 1, '0');",
                0x400000 + i,
                i,
                0x400000 + i,
                0x600000 + i
            ));
        }
        sql.push_str("COMMIT;");
        Self::from_sql(&sql)
    }

    /// A SQLite file without the version key
    pub fn without_version() -> Self {
        Self::from_sql(&format!(
            "{SCHEMA} INSERT INTO info (key, value) VALUES ('ARCH', 'amd64');"
        ))
    }
}
