//! Chronological event stream.
//!
//! Instructions and memory accesses live in separate tables related only by
//! `mem.ins_id`. The stream walks both cursors in step, assigning one
//! logical time per instruction:
//!
//! ```text
//! ins rowid=1            -> INSTRUCTION t=0
//! mem ins_id=2 (R)       -> MEM_READ    t=1
//! mem ins_id=2 (W)       -> MEM_WRITE   t=1
//! ins rowid=2            -> INSTRUCTION t=1
//! ```
//!
//! Memory events come right before the instruction that performed them and
//! share its logical time. This is a merge, not a sort: the memory cursor is
//! ordered by `ins_id` explicitly so the walk is a single pass.

use super::types::{Event, EventKind};
use crate::store::columns::{column_text, column_u64};
use crate::utils::config::{INSTRUCTION_TABLE, MEMORY_TABLE};
use crate::utils::error::StoreError;
use crate::utils::hex::parse_hex_or_zero;
use log::{debug, info, warn};
use rusqlite::{Connection, ErrorCode, InterruptHandle, Row, Rows};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc;

/// Totals of a finished (or stopped) walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSummary {
    pub instructions: u64,
    pub memory_accesses: u64,

    /// The walk stopped before the last instruction
    pub cancelled: bool,
}

impl StreamSummary {
    pub fn total_events(&self) -> u64 {
        self.instructions + self.memory_accesses
    }
}

/// Message delivered to a stream consumer
///
/// Exactly one `Finished` or `Failed` ends every stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamMessage {
    Event(Event),
    Finished(StreamSummary),
    Failed(String),
}

/// A memory row, buffered as the one-row lookahead of the memory cursor
#[derive(Debug, Clone, Copy)]
struct MemoryRow {
    id: u64,
    ins_id: u64,
    kind: EventKind,
    address: u64,
    size: u64,
}

impl MemoryRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let access_type = column_text(row, 2)?.unwrap_or_default();
        Ok(Self {
            id: column_u64(row, 0)?,
            ins_id: column_u64(row, 1)?,
            kind: EventKind::from_access_type(&access_type),
            address: parse_hex_or_zero("addr", column_text(row, 3)?.as_deref()),
            size: column_u64(row, 4)?,
        })
    }

    fn to_event(self, logical_time: u64) -> Event {
        Event {
            kind: self.kind,
            id: self.id,
            address: self.address,
            size: self.size,
            logical_time,
        }
    }
}

fn instruction_event(row: &Row<'_>, logical_time: u64) -> rusqlite::Result<Event> {
    let opcode_len = column_text(row, 2)?.map(|op| op.len()).unwrap_or(0);
    Ok(Event {
        kind: EventKind::Instruction,
        id: column_u64(row, 0)?,
        address: parse_hex_or_zero("ip", column_text(row, 1)?.as_deref()),
        size: (opcode_len / 2) as u64,
        logical_time,
    })
}

fn next_memory_row(rows: &mut Rows<'_>) -> rusqlite::Result<Option<MemoryRow>> {
    match rows.next()? {
        Some(row) => MemoryRow::from_row(row).map(Some),
        None => Ok(None),
    }
}

/// Walk the trace in logical time order
///
/// **Public** - synchronous core of the event stream
///
/// # Arguments
/// * `conn` - Trace connection (both cursors are opened on it)
/// * `cancel` - Checked before each instruction; set it to stop the walk
/// * `emit` - Called once per event; returning `false` stops the walk
///
/// # Returns
/// Counts of emitted events. `cancelled` is set when the walk stopped early.
///
/// Both statements are finalized when this function returns, on every path.
/// A SQLite interrupt raised after `cancel` was set ends the walk as a
/// cancellation rather than an error.
pub fn walk_events<F>(
    conn: &Connection,
    cancel: &AtomicBool,
    mut emit: F,
) -> rusqlite::Result<StreamSummary>
where
    F: FnMut(Event) -> bool,
{
    let mut summary = StreamSummary::default();

    match merge_cursors(conn, cancel, &mut emit, &mut summary) {
        Ok(()) => Ok(summary),
        Err(e) if is_interrupt(&e) && cancel.load(Ordering::Relaxed) => {
            info!("Event stream interrupted during a query");
            summary.cancelled = true;
            Ok(summary)
        }
        Err(e) => Err(e),
    }
}

fn is_interrupt(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::OperationInterrupted
    )
}

fn merge_cursors<F>(
    conn: &Connection,
    cancel: &AtomicBool,
    emit: &mut F,
    summary: &mut StreamSummary,
) -> rusqlite::Result<()>
where
    F: FnMut(Event) -> bool,
{
    let mut ins_stmt = conn.prepare(&format!(
        "SELECT rowid, ip, op FROM {INSTRUCTION_TABLE} ORDER BY rowid"
    ))?;
    let mut mem_stmt = conn.prepare(&format!(
        "SELECT rowid, ins_id, type, addr, size FROM {MEMORY_TABLE} ORDER BY ins_id, rowid"
    ))?;

    let mut instructions = ins_stmt.query([])?;
    let mut accesses = mem_stmt.query([])?;
    let mut pending = next_memory_row(&mut accesses)?;

    let mut logical_time = 0u64;

    while let Some(row) = instructions.next()? {
        if cancel.load(Ordering::Relaxed) {
            info!("Event stream cancelled at logical time {}", logical_time);
            summary.cancelled = true;
            return Ok(());
        }

        let instruction = instruction_event(row, logical_time)?;

        while let Some(access) = pending {
            if access.ins_id > instruction.id {
                break;
            }

            if access.ins_id == instruction.id {
                summary.memory_accesses += 1;
                if !emit(access.to_event(logical_time)) {
                    debug!("Event consumer went away, stopping walk");
                    summary.cancelled = true;
                    return Ok(());
                }
            } else {
                debug!(
                    "Skipping memory access {} of missing instruction {}",
                    access.id, access.ins_id
                );
            }

            pending = next_memory_row(&mut accesses)?;
        }

        summary.instructions += 1;
        if !emit(instruction) {
            debug!("Event consumer went away, stopping walk");
            summary.cancelled = true;
            return Ok(());
        }

        logical_time += 1;
    }

    Ok(())
}

/// Event stream running on a worker thread
///
/// Events arrive through a bounded channel, so a slow consumer holds the
/// worker back instead of buffering the whole trace. Receive with
/// [`EventStream::recv`] from async code or iterate from blocking code.
///
/// Dropping the stream cancels the walk and joins the worker.
pub struct EventStream {
    receiver: mpsc::Receiver<StreamMessage>,
    cancel: Arc<AtomicBool>,
    interrupt: InterruptHandle,
    worker: Option<JoinHandle<()>>,
}

impl EventStream {
    /// Start walking on a dedicated connection
    ///
    /// **Public** - used by `TraceStore::stream_events`
    ///
    /// # Arguments
    /// * `conn` - Connection owned by the worker for the whole walk
    /// * `capacity` - Channel bound (clamped to at least 1)
    pub fn spawn(conn: Connection, capacity: usize) -> Result<Self, StoreError> {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let cancel = Arc::new(AtomicBool::new(false));
        let worker_cancel = Arc::clone(&cancel);
        let interrupt = conn.get_interrupt_handle();

        let worker = thread::Builder::new()
            .name("trace-event-stream".to_string())
            .spawn(move || run_worker(conn, &worker_cancel, sender))
            .map_err(|e| StoreError::Worker(e.to_string()))?;

        Ok(Self {
            receiver,
            cancel,
            interrupt,
            worker: Some(worker),
        })
    }

    /// Ask the worker to stop before its next instruction
    ///
    /// Already queued events are still delivered, followed by a
    /// `Finished` summary with `cancelled` set. A query the worker is
    /// blocked in (such as the initial sort of the memory cursor) is
    /// interrupted.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
        self.interrupt.interrupt();
    }

    /// Receive the next message from async code
    pub async fn recv(&mut self) -> Option<StreamMessage> {
        self.receiver.recv().await
    }

    /// Receive the next message, blocking the current thread
    ///
    /// Must not be called from within an async runtime.
    pub fn blocking_recv(&mut self) -> Option<StreamMessage> {
        self.receiver.blocking_recv()
    }
}

impl Iterator for EventStream {
    type Item = StreamMessage;

    fn next(&mut self) -> Option<Self::Item> {
        self.blocking_recv()
    }
}

impl Drop for EventStream {
    fn drop(&mut self) {
        self.cancel();
        // Unblocks a worker waiting for channel capacity
        self.receiver.close();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Event stream worker panicked");
            }
        }
    }
}

fn run_worker(conn: Connection, cancel: &AtomicBool, sender: mpsc::Sender<StreamMessage>) {
    info!("Event stream started");

    let result = walk_events(&conn, cancel, |event| {
        sender.blocking_send(StreamMessage::Event(event)).is_ok()
    });

    let terminal = match result {
        Ok(summary) => {
            info!(
                "Event stream finished: {} instructions, {} memory accesses{}",
                summary.instructions,
                summary.memory_accesses,
                if summary.cancelled { " (cancelled)" } else { "" }
            );
            StreamMessage::Finished(summary)
        }
        Err(e) => {
            warn!("Event stream failed: {}", e);
            StreamMessage::Failed(e.to_string())
        }
    };

    // The consumer may already be gone
    let _ = sender.blocking_send(terminal);
}
