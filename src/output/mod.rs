//! Output for the presentation layer.
//!
//! This module handles:
//! - The versioned JSON report (series, statistics, header, timing)
//! - Text summaries for the terminal
//! - Byte and count formatting helpers

pub mod format;
pub mod json;
pub mod report;
pub mod summary;

// Re-export main functions
pub use format::{format_byte_amount, format_bytes, format_count, format_percentage};
pub use json::{read_report, validate_path, write_report};
pub use report::{to_report, RenderOptions, Report};
pub use summary::generate_text_summary;
