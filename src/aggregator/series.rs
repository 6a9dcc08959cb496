//! Chart-ready series for the presentation layer.
//!
//! Two parallel series share one x axis (position among successful
//! operations): live bytes and fragmentation. Failure markers are
//! operation indices, which count failed operations too.

use crate::parser::schema::{OperationKind, ParsedTrace};
use serde::{Deserialize, Serialize};

/// Parallel series extracted from a parsed trace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceSeries {
    /// Live bytes after each successful operation
    pub allocated_bytes: Vec<u64>,

    /// Fragmentation after each successful operation
    pub fragmentation: Vec<u64>,

    /// Kind of each point
    pub kinds: Vec<OperationKind>,

    /// Operation indices of fragmentation failures
    pub failure_indices: Vec<usize>,
}

impl TraceSeries {
    pub fn len(&self) -> usize {
        self.allocated_bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocated_bytes.is_empty()
    }
}

/// Build the series handed to the renderer
///
/// **Public** - main entry point for series extraction
pub fn build_series(parsed: &ParsedTrace) -> TraceSeries {
    let count = parsed.outcomes.len();
    let mut series = TraceSeries {
        allocated_bytes: Vec::with_capacity(count),
        fragmentation: Vec::with_capacity(count),
        kinds: Vec::with_capacity(count),
        failure_indices: parsed.failure_indices.clone(),
    };

    for outcome in &parsed.outcomes {
        series.allocated_bytes.push(outcome.allocated_bytes_after);
        series.fragmentation.push(outcome.fragmentation);
        series.kinds.push(outcome.kind);
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::EventOutcome;

    #[test]
    fn test_build_series_keeps_order() {
        let parsed = ParsedTrace {
            outcomes: vec![
                EventOutcome {
                    sequence_position: 0,
                    kind: OperationKind::Allocation,
                    size: 64,
                    allocated_bytes_after: 64,
                    fragmentation: 0,
                },
                EventOutcome {
                    sequence_position: 1,
                    kind: OperationKind::Free,
                    size: 64,
                    allocated_bytes_after: 0,
                    fragmentation: 8,
                },
            ],
            failure_indices: vec![3],
            ..Default::default()
        };

        let series = build_series(&parsed);

        assert_eq!(series.len(), 2);
        assert_eq!(series.allocated_bytes, vec![64, 0]);
        assert_eq!(series.fragmentation, vec![0, 8]);
        assert_eq!(series.kinds, vec![OperationKind::Allocation, OperationKind::Free]);
        assert_eq!(series.failure_indices, vec![3]);
    }

    #[test]
    fn test_build_series_empty() {
        let series = build_series(&ParsedTrace::default());
        assert!(series.is_empty());
    }
}
