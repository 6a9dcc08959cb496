//! Trace parsing and data model.
//!
//! This module handles:
//! - Reading allocator traces line by line
//! - Extracting header metadata and the timing footer
//! - Tracking live allocations to produce per-operation outcomes
//! - Classifying fragmentation failures

pub mod alloc_trace;
pub mod schema;

// Re-export main types
pub use alloc_trace::{parse_line, parse_timing_footer, parse_trace, parse_trace_file, ParseContext, TraceLine};
pub use schema::{EventOutcome, OperationKind, ParsedTrace, TimingFooter, TraceHeader};
