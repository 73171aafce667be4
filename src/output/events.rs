//! JSON-lines event export.
//!
//! One serialized `Event` per line, in stream order.

use super::json::create_output_file;
use crate::events::Event;
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Streaming writer for events
pub struct EventWriter<W: Write> {
    writer: W,
    written: u64,
}

impl EventWriter<BufWriter<File>> {
    /// Create a writer for a file, creating parent directories as needed
    pub fn create(output_path: impl AsRef<Path>) -> Result<Self, OutputError> {
        let output_path = output_path.as_ref();
        info!("Writing events to: {}", output_path.display());

        let file = create_output_file(output_path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Append one event as a JSON line
    pub fn write_event(&mut self, event: &Event) -> Result<(), OutputError> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush and return the underlying writer
    pub fn finish(mut self) -> Result<W, OutputError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
