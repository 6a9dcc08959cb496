//! Alloc Trace Studio
//!
//! Trace analysis for memory-allocator benchmark runs: parses the
//! line-oriented event log a benchmark harness records, tracks live
//! allocations, and produces the allocated-bytes and fragmentation
//! series plus summary statistics for charting.
//!
//! This crate provides the core implementation for the
//! `alloc-trace` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! alloc-trace analyze benchmarks/ --summary
//! ```
//!
//! Or from code:
//!
//! ```no_run
//! use alloc_trace_studio::aggregator::calculate_statistics;
//! use alloc_trace_studio::parser::parse_trace_file;
//!
//! let parsed = parse_trace_file("benchmarks/buddy.log")?;
//! let stats = calculate_statistics(&parsed);
//! println!("{}", stats.summary());
//! # Ok::<(), alloc_trace_studio::utils::ParseError>(())
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
