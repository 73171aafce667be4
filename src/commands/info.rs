//! Info command implementation.
//!
//! The info command:
//! 1. Opens and validates the trace
//! 2. Reads metadata and statistics
//! 3. Prints them, optionally writing a JSON report

use crate::commands::models::InfoArgs;
use crate::output::{write_report, TraceReport};
use crate::session::{SessionConfig, TraceSession};
use anyhow::{Context, Result};
use log::info;

/// Execute the info command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The report that was printed (and written, if requested)
pub fn execute_info(args: InfoArgs) -> Result<TraceReport> {
    let session = TraceSession::open(&args.trace, SessionConfig::default())
        .with_context(|| format!("Failed to open trace {}", args.trace.display()))?;

    let metadata = session.metadata().context("Failed to read metadata")?;
    let statistics = session.statistics().context("Failed to count records")?;

    let report = TraceReport::new(
        args.trace.display().to_string(),
        metadata,
        statistics,
        session.symbols().len(),
    );

    print_report(&report);

    if let Some(path) = &args.output_json {
        write_report(&report, path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    }

    Ok(report)
}

fn print_report(report: &TraceReport) {
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    println!("Trace:        {}", report.trace_path);
    println!("Tool version: {}", show(&report.metadata.tool_version));
    println!("Arch:         {}", show(&report.metadata.arch));
    println!("Program:      {}", show(&report.metadata.program));
    println!("Args:         {}", show(&report.metadata.args));
    println!("Blocks:       {}", report.statistics.block_count);
    println!("Instructions: {}", report.statistics.instruction_count);
    println!("Mem accesses: {}", report.statistics.memory_access_count);
    println!("Symbols:      {}", report.symbol_count);
}
