//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use analyze::{analyze_trace_file, collect_trace_files, execute_analyze, report_path_for, validate_args};
pub use models::{AnalyzeArgs, BatchSummary};
pub use utils::{display_schema, display_version, validate_report_file};
