//! A trace opened for exploration.
//!
//! The session validates the store, builds the symbol index once and keeps
//! it for the trace's lifetime. The index is immutable and shared through an
//! `Arc`, so detail lookups can run while an event stream is in flight.

use crate::events::{Event, EventKind, EventStream};
use crate::store::{Metadata, Statistics, TraceStore};
use crate::symbols::{ResolvedSymbol, SymbolIndex};
use crate::utils::config::DEFAULT_EVENT_CHANNEL_CAPACITY;
use crate::utils::error::StoreError;
use std::path::Path;
use std::sync::Arc;

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Bound of the event stream channel
    pub event_channel_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            event_channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event_channel_capacity(mut self, capacity: usize) -> Self {
        self.event_channel_capacity = capacity.max(1);
        self
    }
}

/// Validated store plus its symbol index
pub struct TraceSession {
    store: TraceStore,
    symbols: Arc<SymbolIndex>,
    config: SessionConfig,
}

impl TraceSession {
    /// Open a trace and build its symbol index
    pub fn open(path: impl AsRef<Path>, config: SessionConfig) -> Result<Self, StoreError> {
        let store = TraceStore::open(path)?;
        let symbols = Arc::new(store.load_symbols()?);

        Ok(Self {
            store,
            symbols,
            config,
        })
    }

    /// Shared handle to the symbol index
    pub fn symbols(&self) -> Arc<SymbolIndex> {
        Arc::clone(&self.symbols)
    }

    pub fn metadata(&self) -> Result<Metadata, StoreError> {
        self.store.metadata()
    }

    pub fn statistics(&self) -> Result<Statistics, StoreError> {
        self.store.statistics()
    }

    /// Resolve an address to its nearest-below global symbol
    pub fn resolve(&self, addr: u64) -> Option<ResolvedSymbol<'_>> {
        self.symbols.resolve(addr)
    }

    /// Start the event stream with the configured channel bound
    pub fn stream_events(&self) -> Result<EventStream, StoreError> {
        self.store.stream_events(self.config.event_channel_capacity)
    }

    /// Describe an event by kind and row id
    pub fn describe_event(&self, kind: EventKind, id: u64) -> Result<String, StoreError> {
        self.store.describe_event(&self.symbols, kind, id)
    }

    /// Describe an event received from the stream
    pub fn describe(&self, event: &Event) -> Result<String, StoreError> {
        self.describe_event(event.kind, event.id)
    }
}
