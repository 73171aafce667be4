//! Event records emitted by the stream generator.

use crate::utils::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of trace event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Instruction,
    MemRead,
    MemWrite,
    MemUnknown,
}

impl EventKind {
    /// Map a memory access type letter (`R`, `W`) to an event kind
    pub fn from_access_type(access_type: &str) -> Self {
        match access_type {
            "R" => Self::MemRead,
            "W" => Self::MemWrite,
            _ => Self::MemUnknown,
        }
    }

    pub fn is_memory(self) -> bool {
        !matches!(self, Self::Instruction)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Instruction => "INSTRUCTION",
            Self::MemRead => "MEM_READ",
            Self::MemWrite => "MEM_WRITE",
            Self::MemUnknown => "MEM_UNKNOWN",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ins" | "instruction" => Ok(Self::Instruction),
            "r" | "read" | "mem_read" => Ok(Self::MemRead),
            "w" | "write" | "mem_write" => Ok(Self::MemWrite),
            "unknown" | "mem_unknown" => Ok(Self::MemUnknown),
            _ => Err(ParseError::UnknownEventKind(s.to_string())),
        }
    }
}

/// One instruction or memory access, in logical time order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,

    /// Row id in the instruction or memory table
    pub id: u64,

    /// Instruction pointer or accessed address
    pub address: u64,

    /// Opcode length for instructions, access width for memory events
    pub size: u64,

    /// Index of the instruction this event belongs to
    pub logical_time: u64,
}
