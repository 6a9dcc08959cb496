use crate::output::{format_bytes, read_report};
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::Path;

/// Validate a report JSON file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)
        .with_context(|| format!("Invalid report {}", file_path.display()))?;

    if report.series.allocated_bytes.len() != report.series.fragmentation.len() {
        anyhow::bail!(
            "Series length mismatch: {} allocated points, {} fragmentation points",
            report.series.allocated_bytes.len(),
            report.series.fragmentation.len()
        );
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Source: {}", report.source);
    println!("  Allocator: {}", report.header.allocator_label());
    println!("  Total Memory: {}", format_bytes(report.header.total_size));
    println!("  Operations: {}", report.statistics.operation_count);
    println!("  Series Points: {}", report.series.len());
    println!("  Frag Failures: {}", report.statistics.failure_count);

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Alloc Trace Studio Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  source: string             - Trace file name");
        println!("  header: object             - Allocator configuration");
        println!("    allocator_name: string?  - Allocator type");
        println!("    total_size: number       - Managed capacity in bytes");
        println!("    max_levels: number       - Allocator-specific setting");
        println!("  timing: object?            - Footer timing (if present)");
        println!("    elapsed_seconds: number");
        println!("    user_seconds: number");
        println!("    sys_seconds: number");
        println!("  statistics: object         - Summary statistics");
        println!("    peak_allocated: number");
        println!("    total_allocated_requests: number");
        println!("    average_fragmentation: number");
        println!("    max_fragmentation: number");
        println!("    operation_count: number");
        println!("    throughput_ops_per_second: number");
        println!("    failure_count: number");
        println!("    utilization: number?     - Peak / total_size");
        println!("  series: object             - Chart data");
        println!("    allocated_bytes: array   - Live bytes per successful operation");
        println!("    fragmentation: array     - Fragmentation per successful operation");
        println!("    kinds: array             - 'allocation' or 'free' per point");
        println!("    failure_indices: array   - Operation indices of fragmentation failures");
        println!("  render: object             - Renderer switches");
        println!("    include_statistics: bool");
        println!("  generated_at: string       - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Alloc Trace Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Trace analysis for memory-allocator benchmark runs.");
}
