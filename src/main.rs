//! TraceGraph CLI
//!
//! Explore a recorded execution trace from the command line: metadata,
//! statistics, symbols, the event stream and per-event details.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use tracegraph_store::commands::{
    execute_describe, execute_events, execute_info, execute_resolve, execute_symbols,
    validate_events_args, DescribeArgs, EventsArgs, InfoArgs, ResolveArgs,
};
use tracegraph_store::events::EventKind;
use tracegraph_store::utils::config::{DEFAULT_EVENT_CHANNEL_CAPACITY, REPORT_SCHEMA_VERSION};

/// TraceGraph - explore recorded execution traces
#[derive(Parser, Debug)]
#[command(name = "tracegraph")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show metadata and record counts
    Info {
        /// Trace database
        trace: PathBuf,

        /// Write a JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List global symbols in address order
    Symbols {
        /// Trace database
        trace: PathBuf,
    },

    /// Stream events in logical time order
    Events {
        /// Trace database
        trace: PathBuf,

        /// Stop after this many events
        #[arg(short, long)]
        limit: Option<u64>,

        /// Export events as JSON lines instead of printing them
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum number of events buffered between reader and printer
        #[arg(long, default_value_t = DEFAULT_EVENT_CHANNEL_CAPACITY)]
        channel_capacity: usize,
    },

    /// Describe one event with symbol-annotated addresses
    Describe {
        /// Trace database
        trace: PathBuf,

        /// Event kind (ins, read, write, unknown)
        #[arg(short, long)]
        kind: EventKind,

        /// Row id of the event
        #[arg(short, long)]
        id: u64,
    },

    /// Resolve an address to its nearest global symbol
    Resolve {
        /// Trace database
        trace: PathBuf,

        /// Address in hex (with or without 0x)
        #[arg(short, long)]
        addr: String,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Info { trace, output } => {
            execute_info(InfoArgs {
                trace,
                output_json: output,
            })?;
        }

        Commands::Symbols { trace } => {
            let count = execute_symbols(&trace)?;
            log::info!("{} global symbols", count);
        }

        Commands::Events {
            trace,
            limit,
            output,
            channel_capacity,
        } => {
            let args = EventsArgs {
                trace,
                limit,
                output_jsonl: output,
                channel_capacity,
            };

            // Validate args first
            validate_events_args(&args)?;

            let summary = execute_events(args)?;
            log::info!(
                "{} instructions, {} memory accesses{}",
                summary.instructions,
                summary.memory_accesses,
                if summary.cancelled { " (stopped early)" } else { "" }
            );
        }

        Commands::Describe { trace, kind, id } => {
            execute_describe(DescribeArgs { trace, kind, id })?;
        }

        Commands::Resolve { trace, addr } => {
            execute_resolve(ResolveArgs {
                trace,
                address: addr,
            })?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("TraceGraph v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!();
    println!("Read-only explorer for recorded execution traces.");
}
