//! Lookup commands: describe, resolve and symbols.
//!
//! These are one-shot lookups against a session: one event's detail, one
//! address's symbol, or the whole symbol index.

use crate::commands::models::{DescribeArgs, ResolveArgs};
use crate::session::{SessionConfig, TraceSession};
use crate::utils::hex::parse_hex;
use anyhow::{Context, Result};
use std::path::Path;

/// Execute the describe command
///
/// **Public** - prints and returns the event description
pub fn execute_describe(args: DescribeArgs) -> Result<String> {
    let session = open_session(&args.trace)?;

    let description = session
        .describe_event(args.kind, args.id)
        .with_context(|| format!("Failed to describe {} event {}", args.kind, args.id))?;

    print!("{}", description);
    if !description.ends_with('\n') {
        println!();
    }

    Ok(description)
}

/// Execute the resolve command
///
/// **Public** - prints and returns `name + 0xoffset`, or `None` below all symbols
pub fn execute_resolve(args: ResolveArgs) -> Result<Option<String>> {
    let address = parse_hex(&args.address).context("Invalid address")?;
    let session = open_session(&args.trace)?;

    let resolved = session.resolve(address).map(|r| r.to_string());
    match &resolved {
        Some(text) => println!("0x{:x}: {}", address, text),
        None => println!("0x{:x}: unknown", address),
    }

    Ok(resolved)
}

/// Execute the symbols command
///
/// **Public** - prints the index in address order, returns the symbol count
pub fn execute_symbols(trace: &Path) -> Result<usize> {
    let session = open_session(trace)?;
    let symbols = session.symbols();

    for symbol in symbols.iter() {
        println!(
            "0x{:016x} {:>8x} {} ({})",
            symbol.addr, symbol.size, symbol.name, symbol.path
        );
    }

    Ok(symbols.len())
}

fn open_session(trace: &Path) -> Result<TraceSession> {
    TraceSession::open(trace, SessionConfig::default())
        .with_context(|| format!("Failed to open trace {}", trace.display()))
}
