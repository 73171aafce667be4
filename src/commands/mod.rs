//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod events;
pub mod info;
pub mod lookup;
pub mod models;

// Re-export main command functions
pub use lookup::{execute_describe, execute_resolve, execute_symbols};
pub use events::{execute_events, format_event, validate_events_args};
pub use info::execute_info;
pub use models::{DescribeArgs, EventsArgs, InfoArgs, ResolveArgs};
