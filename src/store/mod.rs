//! Read-only access to a recorded trace database.
//!
//! This module handles:
//! - Opening the trace read-only and validating its format
//! - Metadata and statistics queries
//! - Handing the shared connection to the symbol loader, the detail
//!   resolver and the event stream

pub(crate) mod columns;
pub mod metadata;
pub mod schema;
pub mod stats;

use crate::events::{describe_event, EventKind, EventStream};
use crate::symbols::{load_symbols, SymbolIndex};
use crate::utils::error::StoreError;
use log::{debug, info, warn};
use parking_lot::Mutex;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

// Re-export main types
pub use metadata::{query_metadata, Metadata};
pub use schema::has_version_key;
pub use stats::{query_statistics, Statistics};

/// An opened, validated trace
///
/// All queries go through one connection guarded by a mutex. The event
/// stream is the exception: it opens its own read-only connection so a long
/// walk never blocks detail lookups.
pub struct TraceStore {
    path: PathBuf,
    conn: Mutex<Connection>,
}

impl TraceStore {
    /// Open a trace read-only and check that it is a recognized format
    ///
    /// **Public** - main entry point for the store
    ///
    /// # Errors
    /// * `StoreError::OpenFailed` - SQLite could not open the file
    /// * `StoreError::InvalidDatabase` - no tool version key in `info`
    ///
    /// On failure the connection is closed before the error is returned.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        info!("Opening trace: {}", path.display());

        let conn = open_read_only(path)?;

        match has_version_key(&conn) {
            Ok(true) => {}
            Ok(false) => {
                drop(conn);
                warn!("No tool version key in {}", path.display());
                return Err(StoreError::InvalidDatabase(path.display().to_string()));
            }
            Err(e) => {
                drop(conn);
                warn!("Version probe failed for {}: {}", path.display(), e);
                return Err(StoreError::InvalidDatabase(path.display().to_string()));
            }
        }

        info!("Connected to trace: {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            conn: Mutex::new(conn),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the metadata record
    pub fn metadata(&self) -> Result<Metadata, StoreError> {
        Ok(query_metadata(&self.conn.lock())?)
    }

    /// Count blocks, instructions and memory accesses
    pub fn statistics(&self) -> Result<Statistics, StoreError> {
        Ok(query_statistics(&self.conn.lock())?)
    }

    /// Build the symbol index
    ///
    /// Every call builds a fresh index; keep the result for the lifetime of
    /// the trace (see `TraceSession`).
    pub fn load_symbols(&self) -> Result<SymbolIndex, StoreError> {
        Ok(load_symbols(&self.conn.lock())?)
    }

    /// Describe one event, annotating address columns through `symbols`
    pub fn describe_event(
        &self,
        symbols: &SymbolIndex,
        kind: EventKind,
        id: u64,
    ) -> Result<String, StoreError> {
        Ok(describe_event(&self.conn.lock(), symbols, kind, id)?)
    }

    /// Start streaming events on a worker thread
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of undelivered events
    pub fn stream_events(&self, capacity: usize) -> Result<EventStream, StoreError> {
        debug!("Opening worker connection for event stream");
        let conn = open_read_only(&self.path)?;
        EventStream::spawn(conn, capacity)
    }
}

/// Open a SQLite file without write access
fn open_read_only(path: &Path) -> Result<Connection, StoreError> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| StoreError::OpenFailed {
        path: path.display().to_string(),
        source,
    })
}
