use crate::events::EventKind;
use crate::utils::config::DEFAULT_EVENT_CHANNEL_CAPACITY;
use std::path::PathBuf;

/// Arguments for the info command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct InfoArgs {
    /// Trace database
    pub trace: PathBuf,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,
}

/// Arguments for the events command
#[derive(Debug, Clone)]
pub struct EventsArgs {
    /// Trace database
    pub trace: PathBuf,

    /// Stop after this many events
    pub limit: Option<u64>,

    /// Output path for JSON-lines export (stdout text when omitted)
    pub output_jsonl: Option<PathBuf>,

    /// Bound of the event channel
    pub channel_capacity: usize,
}

impl Default for EventsArgs {
    fn default() -> Self {
        Self {
            trace: PathBuf::new(),
            limit: None,
            output_jsonl: None,
            channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
        }
    }
}

/// Arguments for the describe command
#[derive(Debug, Clone)]
pub struct DescribeArgs {
    /// Trace database
    pub trace: PathBuf,

    pub kind: EventKind,

    /// Row id of the event
    pub id: u64,
}

/// Arguments for the resolve command
#[derive(Debug, Clone)]
pub struct ResolveArgs {
    /// Trace database
    pub trace: PathBuf,

    /// Address as hex text
    pub address: String,
}
