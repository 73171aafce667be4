//! Events command implementation.
//!
//! Streams the trace in logical time order, printing each event or
//! exporting it as JSON lines. A limit cancels the stream early.

use crate::commands::models::EventsArgs;
use crate::events::{Event, StreamMessage, StreamSummary};
use crate::output::EventWriter;
use crate::session::{SessionConfig, TraceSession};
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the events command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Summary reported by the stream worker
pub fn execute_events(args: EventsArgs) -> Result<StreamSummary> {
    let start_time = Instant::now();

    let config = SessionConfig::new().with_event_channel_capacity(args.channel_capacity);
    let session = TraceSession::open(&args.trace, config)
        .with_context(|| format!("Failed to open trace {}", args.trace.display()))?;

    let mut writer = match &args.output_jsonl {
        Some(path) => Some(EventWriter::create(path).context("Failed to create event export")?),
        None => None,
    };

    let mut stream = session.stream_events().context("Failed to start event stream")?;
    let mut received = 0u64;

    let summary = loop {
        let Some(message) = stream.blocking_recv() else {
            anyhow::bail!("Event stream ended without a summary");
        };

        match message {
            StreamMessage::Event(event) => {
                if args.limit.is_some_and(|limit| received >= limit) {
                    // Drain whatever the worker already queued
                    continue;
                }

                match writer.as_mut() {
                    Some(writer) => writer
                        .write_event(&event)
                        .context("Failed to write event")?,
                    None => println!("{}", format_event(&event)),
                }

                received += 1;
                if args.limit.is_some_and(|limit| received >= limit) {
                    debug!("Reached limit of {} events, cancelling stream", received);
                    stream.cancel();
                }
            }
            StreamMessage::Finished(summary) => break summary,
            StreamMessage::Failed(reason) => anyhow::bail!("Event stream failed: {}", reason),
        }
    };

    if let Some(writer) = writer {
        let written = writer.written();
        writer.finish().context("Failed to flush event export")?;
        info!("✓ {} events exported", written);
    }

    info!(
        "Streamed {} events in {:.2}s",
        received,
        start_time.elapsed().as_secs_f64()
    );

    Ok(summary)
}

/// One-line text rendering of an event
pub fn format_event(event: &Event) -> String {
    format!(
        "{:>10} {:<11} id={:<8} addr=0x{:x} size={}",
        event.logical_time, event.kind, event.id, event.address, event.size
    )
}

/// Validate events arguments
///
/// **Public** - can be called before execute_events for early validation
pub fn validate_events_args(args: &EventsArgs) -> Result<()> {
    if args.trace.as_os_str().is_empty() {
        anyhow::bail!("Trace path cannot be empty");
    }

    if args.limit == Some(0) {
        anyhow::bail!("limit must be greater than 0");
    }

    if args.channel_capacity == 0 {
        anyhow::bail!("channel capacity must be greater than 0");
    }

    Ok(())
}
