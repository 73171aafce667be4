//! Trace events: the chronological stream and per-event details.
//!
//! This module handles:
//! - Merging instruction and memory rows into one logically timed sequence
//! - Running that merge on a worker thread behind a bounded channel
//! - Describing a single event with symbol-annotated addresses

pub mod detail;
pub mod stream;
pub mod types;

// Re-export main types
pub use detail::describe_event;
pub use stream::{walk_events, EventStream, StreamMessage, StreamSummary};
pub use types::{Event, EventKind};
