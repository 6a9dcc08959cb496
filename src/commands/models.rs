use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Trace files, or directories scanned for `*.log` traces
    pub inputs: Vec<PathBuf>,

    /// Where reports go (None = next to each trace)
    pub output_dir: Option<PathBuf>,

    /// Ask the renderer for the statistics box
    pub include_statistics: bool,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_dir: None,
            include_statistics: true,
            print_summary: false,
        }
    }
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Reports written, one per successfully processed trace
    pub reports: Vec<PathBuf>,

    /// Traces that could not be processed
    pub failed: Vec<PathBuf>,
}

impl BatchSummary {
    pub fn processed(&self) -> usize {
        self.reports.len()
    }

    /// True when there was work to do and none of it succeeded
    pub fn all_failed(&self) -> bool {
        self.reports.is_empty() && !self.failed.is_empty()
    }
}
