//! Report schema handed to the presentation layer.
//!
//! One report per trace. The schema is versioned to allow future evolution.

use crate::aggregator::{build_series, StatisticsRecord, TraceSeries};
use crate::parser::schema::{ParsedTrace, TimingFooter, TraceHeader};
use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for compatibility checking
    pub version: String,

    /// Name of the trace file this report describes
    pub source: String,

    pub header: TraceHeader,

    /// Footer timing, absent when the trace has none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<TimingFooter>,

    pub statistics: StatisticsRecord,

    pub series: TraceSeries,

    pub render: RenderOptions,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// Switches for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Draw the statistics box next to the chart
    pub include_statistics: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_statistics: true,
        }
    }
}

/// Assemble a report from one parse and its statistics
///
/// **Public** - used by commands to create final output
pub fn to_report(
    source: impl Into<String>,
    parsed: &ParsedTrace,
    statistics: StatisticsRecord,
    render: RenderOptions,
) -> Report {
    Report {
        version: SCHEMA_VERSION.to_string(),
        source: source.into(),
        header: parsed.header.clone(),
        timing: parsed.timing,
        statistics,
        series: build_series(parsed),
        render,
        generated_at: Utc::now().to_rfc3339(),
    }
}
