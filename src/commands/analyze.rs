//! Analyze command implementation.
//!
//! The analyze command, for every trace:
//! 1. Parses the trace
//! 2. Calculates statistics
//! 3. Builds the report for the presentation layer
//! 4. Writes the report (and optionally prints a summary)
//!
//! Traces are independent: one that fails is logged and skipped.

use super::models::{AnalyzeArgs, BatchSummary};
use crate::aggregator::{calculate_statistics, StatisticsRecord};
use crate::output::{generate_text_summary, to_report, write_report, RenderOptions};
use crate::parser::{parse_trace_file, ParsedTrace};
use crate::utils::config::{REPORT_EXTENSION, TRACE_EXTENSION};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Which traces produced reports and which failed. Unreadable
/// directories are listed under `failed` too.
pub fn execute_analyze(args: &AnalyzeArgs) -> Result<BatchSummary> {
    let start_time = Instant::now();

    let mut summary = BatchSummary::default();

    let traces = resolve_inputs(&args.inputs, &mut summary);
    info!("Analyzing {} trace file(s)", traces.len());

    let render = RenderOptions {
        include_statistics: args.include_statistics,
    };

    for trace_path in traces {
        match process_trace(&trace_path, args, render) {
            Ok(report_path) => {
                info!("✓ {} -> {}", trace_path.display(), report_path.display());
                summary.reports.push(report_path);
            }
            Err(e) => {
                warn!("Error processing {}: {:#}", trace_path.display(), e);
                summary.failed.push(trace_path);
            }
        }
    }

    info!(
        "Analysis completed in {:.2}s: {} processed, {} failed",
        start_time.elapsed().as_secs_f64(),
        summary.processed(),
        summary.failed.len()
    );

    Ok(summary)
}

/// Parse one trace and compute its statistics
///
/// **Public** - library entry point for a single file
pub fn analyze_trace_file(path: impl AsRef<Path>) -> Result<(ParsedTrace, StatisticsRecord)> {
    let path = path.as_ref();

    let parsed = parse_trace_file(path)
        .with_context(|| format!("Failed to parse trace {}", path.display()))?;

    debug!(
        "Parsed trace: allocator {}, {} outcomes, {} failures",
        parsed.header.allocator_label(),
        parsed.outcomes.len(),
        parsed.failure_indices.len()
    );

    let statistics = calculate_statistics(&parsed);

    Ok((parsed, statistics))
}

/// Run the full pipeline for one trace
///
/// **Private** - internal helper for execute_analyze
fn process_trace(trace_path: &Path, args: &AnalyzeArgs, render: RenderOptions) -> Result<PathBuf> {
    let report_path = report_path_for(trace_path, args.output_dir.as_deref());
    if is_same_file(trace_path, &report_path) {
        anyhow::bail!(
            "Report would overwrite the trace itself: {}",
            report_path.display()
        );
    }

    let (parsed, statistics) = analyze_trace_file(trace_path)?;

    if statistics.is_over_capacity() {
        warn!(
            "{}: peak of {} bytes exceeds the configured {} bytes",
            trace_path.display(),
            statistics.peak_allocated,
            parsed.header.total_size
        );
    }

    let source = trace_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| trace_path.display().to_string());

    let report = to_report(source, &parsed, statistics, render);

    write_report(&report, &report_path).context("Failed to write report JSON")?;

    if args.print_summary {
        println!("\n{}", "=".repeat(60));
        println!("{}", generate_text_summary(&report));
        println!("{}", "=".repeat(60));
    }

    Ok(report_path)
}

/// Expand input paths into a list of trace files
///
/// **Private** - directories are scanned, files are taken as given.
/// A directory that cannot be read is recorded as failed.
fn resolve_inputs(inputs: &[PathBuf], summary: &mut BatchSummary) -> Vec<PathBuf> {
    let mut traces = Vec::new();

    for input in inputs {
        if !input.is_dir() {
            traces.push(input.clone());
            continue;
        }

        match collect_trace_files(input) {
            Ok(found) => {
                if found.is_empty() {
                    warn!("No .{} traces found in {}", TRACE_EXTENSION, input.display());
                }
                traces.extend(found);
            }
            Err(e) => {
                warn!("Skipping {}: {:#}", input.display(), e);
                summary.failed.push(input.clone());
            }
        }
    }

    traces
}

/// True when both paths name the same file on disk
fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// List trace files in a directory
///
/// **Public** - non-recursive, sorted by path
pub fn collect_trace_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut traces = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                warn!("Unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        if path.is_file() && path.extension().is_some_and(|ext| ext == TRACE_EXTENSION) {
            traces.push(path);
        }
    }

    traces.sort();
    debug!("Found {} traces in {}", traces.len(), dir.display());

    Ok(traces)
}

/// Derive the report path for a trace
///
/// **Public** - `run.log` becomes `run.json`, next to the trace unless
/// `output_dir` is given
pub fn report_path_for(trace_path: &Path, output_dir: Option<&Path>) -> PathBuf {
    let file_name = trace_path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("trace"))
        .with_extension(REPORT_EXTENSION);

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => trace_path.with_file_name(file_name),
    }
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.inputs.is_empty() {
        anyhow::bail!("At least one trace file or directory is required");
    }

    if let Some(dir) = &args.output_dir {
        if dir.exists() && !dir.is_dir() {
            anyhow::bail!("Output directory is a file: {}", dir.display());
        }
    }

    Ok(())
}
