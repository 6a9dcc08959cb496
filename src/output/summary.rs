//! Plain-text statistics box for terminal output.

use super::format::{format_byte_amount, format_bytes, format_count, format_percentage};
use super::report::Report;

/// Render the statistics box for one report
///
/// **Public** - printed by `analyze --summary`
///
/// When `render.include_statistics` is off only the trace identity is
/// printed. Utilization is left out when capacity is unknown, throughput
/// when the trace has no timing footer.
pub fn generate_text_summary(report: &Report) -> String {
    let header = &report.header;
    let stats = &report.statistics;
    let mut lines = Vec::new();

    lines.push(format!("Trace:           {}", report.source));
    lines.push(format!("Allocator:       {}", header.allocator_label()));
    lines.push(format!("Total Memory:    {}", format_bytes(header.total_size)));

    if !report.render.include_statistics {
        return lines.join("\n");
    }

    lines.push(format!("Total Allocated: {}", format_bytes(stats.total_allocated_requests)));
    lines.push(format!("Highest Peak:    {}", format_bytes(stats.peak_allocated)));
    lines.push(format!("Max Frag:        {}", format_bytes(stats.max_fragmentation)));
    lines.push(format!("Avg Frag:        {}", format_byte_amount(stats.average_fragmentation)));
    lines.push(format!("Operations:      {}", format_count(stats.operation_count)));

    if let Some(utilization) = stats.utilization {
        lines.push(format!("Utilization:     {}", format_percentage(utilization)));
    }

    lines.push(format!("Frag Failures:   {}", stats.failure_count));

    if let Some(timing) = report.timing {
        lines.push(format!(
            "Throughput:      {:.2} ops/s ({:.2}s elapsed, {:.2}s user, {:.2}s sys)",
            stats.throughput_ops_per_second,
            timing.elapsed_seconds,
            timing.user_seconds,
            timing.sys_seconds
        ));
    }

    lines.join("\n")
}
