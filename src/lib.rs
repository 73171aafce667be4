//! TraceGraph Store
//!
//! Read-only query core for recorded execution traces. A trace is a SQLite
//! database written by an instrumentation tool; this crate validates it and
//! exposes metadata, statistics, a symbol index and a logically timed event
//! stream with per-event details.
//!
//! ## Getting Started
//!
//! ```ignore
//! use tracegraph_store::events::StreamMessage;
//! use tracegraph_store::session::{SessionConfig, TraceSession};
//!
//! let session = TraceSession::open("trace.db", SessionConfig::default())?;
//! for message in session.stream_events()? {
//!     if let StreamMessage::Event(event) = message {
//!         println!("{}", session.describe(&event)?);
//!     }
//! }
//! ```
//!
//! The `tracegraph` binary wraps the same API for the command line.

pub mod commands;
pub mod events;
pub mod output;
pub mod session;
pub mod store;
pub mod symbols;
pub mod utils;
