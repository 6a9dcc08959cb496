//! Data model produced by the trace parser.
//!
//! These types are handed to the aggregator and, through the report,
//! to whatever renders the charts. All of them serialize to JSON.

use serde::{Deserialize, Serialize};

/// Allocator configuration echoed in the trace header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceHeader {
    /// Allocator under test (`None` when the trace never names it)
    pub allocator_name: Option<String>,

    /// Capacity managed by the allocator, in bytes
    pub total_size: u64,

    /// Allocator-specific setting, carried through untouched
    pub max_levels: u64,
}

impl TraceHeader {
    /// Allocator name for display, `"unknown"` when absent
    pub fn allocator_label(&self) -> &str {
        self.allocator_name.as_deref().unwrap_or("unknown")
    }
}

/// Process timing recorded on the last line of a trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingFooter {
    pub elapsed_seconds: f64,
    pub user_seconds: f64,
    pub sys_seconds: f64,
}

/// Kind of operation behind an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Allocation,
    Free,
}

/// State after one successful operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOutcome {
    /// Position among successful operations (0-based)
    pub sequence_position: usize,

    pub kind: OperationKind,

    /// Requested size for allocations, released size for frees
    pub size: u64,

    /// Bytes live after this operation
    pub allocated_bytes_after: u64,

    /// Internal fragmentation reported by the trace, in bytes
    pub fragmentation: u64,
}

/// Everything a single parse pass produces
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTrace {
    pub header: TraceHeader,

    /// Outcomes of successful operations, in trace order
    pub outcomes: Vec<EventOutcome>,

    /// Operation indices of allocations that failed with enough raw memory free.
    /// Indices count every observed operation, failures included.
    pub failure_indices: Vec<usize>,

    /// Observed operations, successful or not. Malformed lines are excluded.
    pub operation_count: u64,

    pub timing: Option<TimingFooter>,
}

impl ParsedTrace {
    /// Bytes still live at the end of the trace
    pub fn final_allocated_bytes(&self) -> u64 {
        self.outcomes
            .last()
            .map(|o| o.allocated_bytes_after)
            .unwrap_or(0)
    }
}
