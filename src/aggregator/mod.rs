//! Aggregation of parsed traces into statistics and series.
//!
//! This module transforms parser output into:
//! - Summary statistics (peak, totals, fragmentation, throughput)
//! - Chart-ready series for the presentation layer

pub mod metrics;
pub mod series;

// Re-export main types and functions
pub use metrics::{calculate_statistics, calculate_throughput, calculate_utilization, StatisticsRecord};
pub use series::{build_series, TraceSeries};
