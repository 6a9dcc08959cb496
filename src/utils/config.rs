//! Configuration and constants for the trace analyzer.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Marker that starts header, footer and comment lines
pub const COMMENT_MARKER: char = '#';

/// Field separator for event lines
pub const FIELD_SEPARATOR: char = ',';

/// Extension of trace files picked up when scanning a directory
pub const TRACE_EXTENSION: &str = "log";

/// Extension of generated report files
pub const REPORT_EXTENSION: &str = "json";

/// Directory scanned when no input paths are given
pub const DEFAULT_BENCHMARKS_DIR: &str = "./benchmarks";

// Minimum field counts per command (command symbol included)
// a,<index>,<size>,<status>,<fragmentation>
pub const ALLOC_FIELD_COUNT: usize = 5;
// f,<index>,<status>,<fragmentation>
pub const FREE_FIELD_COUNT: usize = 4;

// Header keys
pub const HEADER_TYPE_KEY: &str = "type";
pub const HEADER_TOTAL_SIZE_KEY: &str = "total_size";
pub const HEADER_MAX_LEVELS_KEY: &str = "max_levels";

// Footer keys, in the order they must appear
pub const FOOTER_KEYS: [&str; 3] = ["elapsed_seconds", "user_seconds", "sys_seconds"];

/// Status value reported for a successful operation
pub const STATUS_SUCCESS: &str = "0";

/// Binary byte units, smallest first. The last entry caps the scale.
pub const BYTE_UNITS: &[&str] = &["bytes", "KB", "MB", "GB"];

/// Divisor between consecutive byte units
pub const BYTE_UNIT_STEP: f64 = 1024.0;
