//! Summary statistics over a parsed trace.
//!
//! Everything here is a simple reduction over the parser output; no file
//! access happens after parsing.

use crate::parser::schema::{OperationKind, ParsedTrace};
use log::debug;
use serde::{Deserialize, Serialize};

/// Statistics for one trace
///
/// **Public** - returned from calculate_statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsRecord {
    /// Highest live byte count seen after any successful operation
    pub peak_allocated: u64,

    /// Sum of sizes of successful allocations
    pub total_allocated_requests: u64,

    /// Mean fragmentation across successful operations
    pub average_fragmentation: f64,

    /// Largest fragmentation across successful operations
    pub max_fragmentation: u64,

    /// Observed operations, successful or not
    pub operation_count: u64,

    /// Operations per elapsed second, 0 without usable timing
    pub throughput_ops_per_second: f64,

    /// Allocations that failed despite enough raw free memory
    pub failure_count: usize,

    /// Peak divided by capacity, `None` when capacity is 0
    pub utilization: Option<f64>,
}

impl StatisticsRecord {
    /// Check whether the peak exceeded the configured capacity
    ///
    /// **Public** - an allocator that hands out more than it manages is misbehaving
    pub fn is_over_capacity(&self) -> bool {
        self.utilization.is_some_and(|u| u > 1.0)
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        let utilization = self
            .utilization
            .map(|u| format!("{:.1}%", u * 100.0))
            .unwrap_or_else(|| "n/a".to_string());

        format!(
            "Ops: {} | Peak: {} bytes | Allocated: {} bytes | Frag avg/max: {:.2}/{} | Failures: {} | Utilization: {} | {:.2} ops/s",
            self.operation_count,
            self.peak_allocated,
            self.total_allocated_requests,
            self.average_fragmentation,
            self.max_fragmentation,
            self.failure_count,
            utilization,
            self.throughput_ops_per_second
        )
    }
}

/// Calculate statistics from a parsed trace
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `parsed` - Output of a single parse pass
///
/// # Returns
/// Statistics record; empty series yield zeros
pub fn calculate_statistics(parsed: &ParsedTrace) -> StatisticsRecord {
    let mut peak_allocated: u64 = 0;
    let mut total_allocated_requests: u64 = 0;
    let mut fragmentation_sum: u128 = 0;
    let mut max_fragmentation: u64 = 0;

    for outcome in &parsed.outcomes {
        peak_allocated = peak_allocated.max(outcome.allocated_bytes_after);
        max_fragmentation = max_fragmentation.max(outcome.fragmentation);
        fragmentation_sum += u128::from(outcome.fragmentation);

        if outcome.kind == OperationKind::Allocation {
            total_allocated_requests = total_allocated_requests.saturating_add(outcome.size);
        }
    }

    let average_fragmentation = if parsed.outcomes.is_empty() {
        0.0
    } else {
        fragmentation_sum as f64 / parsed.outcomes.len() as f64
    };

    let elapsed = parsed.timing.map(|t| t.elapsed_seconds);

    let record = StatisticsRecord {
        peak_allocated,
        total_allocated_requests,
        average_fragmentation,
        max_fragmentation,
        operation_count: parsed.operation_count,
        throughput_ops_per_second: calculate_throughput(parsed.operation_count, elapsed),
        failure_count: parsed.failure_indices.len(),
        utilization: calculate_utilization(peak_allocated, parsed.header.total_size),
    };

    debug!("Statistics: {}", record.summary());

    record
}

/// Peak over capacity
///
/// **Public** - `None` when `total_size` is 0. Not clamped: values
/// above 1.0 are reported as they are.
pub fn calculate_utilization(peak_allocated: u64, total_size: u64) -> Option<f64> {
    if total_size == 0 {
        return None;
    }
    Some(peak_allocated as f64 / total_size as f64)
}

/// Operations per second, 0 when elapsed time is missing or zero
///
/// **Public** - used by calculate_statistics
pub fn calculate_throughput(operation_count: u64, elapsed_seconds: Option<f64>) -> f64 {
    match elapsed_seconds {
        Some(elapsed) if elapsed > 0.0 => operation_count as f64 / elapsed,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{EventOutcome, TimingFooter, TraceHeader};

    fn outcome(position: usize, kind: OperationKind, size: u64, after: u64, frag: u64) -> EventOutcome {
        EventOutcome {
            sequence_position: position,
            kind,
            size,
            allocated_bytes_after: after,
            fragmentation: frag,
        }
    }

    #[test]
    fn test_free_does_not_count_as_allocated() {
        let parsed = ParsedTrace {
            header: TraceHeader {
                allocator_name: None,
                total_size: 1000,
                max_levels: 0,
            },
            outcomes: vec![
                outcome(0, OperationKind::Allocation, 300, 300, 10),
                outcome(1, OperationKind::Free, 300, 0, 0),
            ],
            failure_indices: vec![],
            operation_count: 2,
            timing: None,
        };

        let stats = calculate_statistics(&parsed);

        assert_eq!(stats.total_allocated_requests, 300);
        assert_eq!(stats.peak_allocated, 300);
        assert_eq!(stats.average_fragmentation, 5.0);
        assert_eq!(stats.max_fragmentation, 10);
        assert_eq!(stats.utilization, Some(0.3));
    }

    #[test]
    fn test_empty_trace() {
        let stats = calculate_statistics(&ParsedTrace::default());
        assert_eq!(stats.peak_allocated, 0);
        assert_eq!(stats.average_fragmentation, 0.0);
        assert_eq!(stats.max_fragmentation, 0);
        assert_eq!(stats.throughput_ops_per_second, 0.0);
        assert_eq!(stats.utilization, None);
    }

    #[test]
    fn test_throughput_guards() {
        assert_eq!(calculate_throughput(10, None), 0.0);
        assert_eq!(calculate_throughput(10, Some(0.0)), 0.0);
        assert_eq!(calculate_throughput(10, Some(2.0)), 5.0);
    }

    #[test]
    fn test_throughput_from_footer() {
        let parsed = ParsedTrace {
            operation_count: 8,
            timing: Some(TimingFooter {
                elapsed_seconds: 4.0,
                user_seconds: 1.0,
                sys_seconds: 1.0,
            }),
            ..Default::default()
        };
        assert_eq!(calculate_statistics(&parsed).throughput_ops_per_second, 2.0);
    }

    #[test]
    fn test_over_capacity() {
        let stats = StatisticsRecord {
            utilization: calculate_utilization(1500, 1000),
            ..Default::default()
        };
        assert!(stats.is_over_capacity());
        assert!(!StatisticsRecord::default().is_over_capacity());
    }
}
