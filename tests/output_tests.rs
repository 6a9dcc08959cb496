use alloc_trace_studio::aggregator::calculate_statistics;
use alloc_trace_studio::output::{
    format_bytes, generate_text_summary, read_report, to_report, write_report, RenderOptions,
    Report,
};
use alloc_trace_studio::parser::parse_trace;
use alloc_trace_studio::utils::config::SCHEMA_VERSION;
use pretty_assertions::assert_eq;
use std::io::Cursor;
use tempfile::NamedTempFile;

const SAMPLE_TRACE: &str = "\
# type=buddy
# total_size=1024,max_levels=5
a,0,256,0,0
a,1,256,0,32
f,0,0,0
a,2,512,0,0
# elapsed_seconds=1.0 user_seconds=0.5 sys_seconds=0.1
";

fn create_test_report(text: &str, include_statistics: bool) -> Report {
    let parsed = parse_trace(Cursor::new(text)).unwrap();
    let stats = calculate_statistics(&parsed);
    to_report("buddy.log", &parsed, stats, RenderOptions { include_statistics })
}

#[test]
fn test_format_bytes_contract() {
    assert_eq!(format_bytes(1023), "1023 bytes");
    assert_eq!(format_bytes(1024), "1.00 KB");
    assert_eq!(format_bytes((1024.0 * 1024.0 * 1.5) as u64), "1.50 MB");
}

#[test]
fn test_report_fields() {
    let report = create_test_report(SAMPLE_TRACE, true);

    assert_eq!(report.version, SCHEMA_VERSION);
    assert_eq!(report.source, "buddy.log");
    assert_eq!(report.header.total_size, 1024);
    assert_eq!(report.series.allocated_bytes, vec![256, 512, 256, 768]);
    assert_eq!(report.statistics.peak_allocated, 768);
    assert!(report.render.include_statistics);
}

#[test]
fn test_write_and_read_report() {
    let report = create_test_report(SAMPLE_TRACE, true);
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    write_report(&report, path).unwrap();
    let loaded = read_report(path).unwrap();

    assert_eq!(loaded, report);
}

#[test]
fn test_report_without_footer_omits_timing() {
    let report = create_test_report("a,0,10,0,0\n", true);
    let json = serde_json::to_value(&report).unwrap();

    assert!(json.get("timing").is_none());
    assert_eq!(json["statistics"]["throughput_ops_per_second"], 0.0);
    assert!(json["statistics"]["utilization"].is_null());
    assert_eq!(json["series"]["kinds"][0], "allocation");
}

#[test]
fn test_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/report.json");

    let report = create_test_report(SAMPLE_TRACE, true);
    write_report(&report, &nested_path).unwrap();

    assert!(nested_path.exists());
}

#[test]
fn test_write_to_directory_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let report = create_test_report(SAMPLE_TRACE, true);

    assert!(write_report(&report, temp_dir.path()).is_err());
}

#[test]
fn test_text_summary_with_statistics() {
    let summary = generate_text_summary(&create_test_report(SAMPLE_TRACE, true));

    assert!(summary.contains("Allocator:       buddy"));
    assert!(summary.contains("Total Memory:    1.00 KB"));
    assert!(summary.contains("Total Allocated: 1.00 KB"));
    assert!(summary.contains("Highest Peak:    768 bytes"));
    assert!(summary.contains("Avg Frag:        8 bytes"));
    assert!(summary.contains("Operations:      4"));
    assert!(summary.contains("Utilization:     75.0%"));
    assert!(summary.contains("Frag Failures:   0"));
    assert!(summary.contains("Throughput:      4.00 ops/s"));
}

#[test]
fn test_text_summary_without_statistics() {
    let summary = generate_text_summary(&create_test_report(SAMPLE_TRACE, false));

    assert!(summary.contains("Allocator:       buddy"));
    assert!(!summary.contains("Highest Peak"));
    assert!(!summary.contains("Throughput"));
}

#[test]
fn test_text_summary_skips_undefined_values() {
    let summary = generate_text_summary(&create_test_report("a,0,10,0,0\n", true));

    assert!(summary.contains("Allocator:       unknown"));
    assert!(!summary.contains("Utilization"));
    assert!(!summary.contains("Throughput"));
}
