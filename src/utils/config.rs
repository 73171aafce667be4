//! Configuration and constants for the trace store.

/// Current output report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Default number of in-flight events between the stream worker and its consumer
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 1024;

// Table names in the trace database
pub const INFO_TABLE: &str = "info";
pub const BLOCK_TABLE: &str = "bbl";
pub const INSTRUCTION_TABLE: &str = "ins";
pub const MEMORY_TABLE: &str = "mem";
pub const SYMBOL_TABLE: &str = "sym";

// Tool version keys in the info table. Either one marks a valid trace.
pub const CURRENT_VERSION_KEY: &str = "TRACERGRIND_VERSION";
pub const LEGACY_VERSION_KEY: &str = "TRACERPIN_VERSION";
pub const VERSION_KEYS: &[&str] = &[CURRENT_VERSION_KEY, LEGACY_VERSION_KEY];

// Metadata keys, in lookup order. For pairs, the later key wins when both are set.
pub const TOOL_VERSION_KEYS: &[&str] = &[CURRENT_VERSION_KEY, LEGACY_VERSION_KEY];
pub const ARCH_KEY: &str = "ARCH";
pub const PROGRAM_KEYS: &[&str] = &["PROGRAM", "PINPROGRAM"];
pub const ARGS_KEY: &str = "ARGS";

/// Columns whose values are addresses and get a symbol annotation in event details
pub const ADDRESS_COLUMNS: &[&str] = &["ip", "addr", "addr_end"];

/// Prefix for names synthesized for anonymous symbols
pub const ANONYMOUS_SYMBOL_PREFIX: &str = "unk_";

// Literal event descriptions
pub const UNKNOWN_EVENT_DESCRIPTION: &str = "Unknown event type.";
pub const EVENT_NOT_FOUND_DESCRIPTION: &str = "Event not found in database.";
