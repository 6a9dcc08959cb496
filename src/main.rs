//! Alloc Trace Studio CLI
//!
//! Analyzes memory-allocator benchmark traces.
//! Writes one JSON report per trace for charting, plus optional text summaries.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::warn;
use std::path::PathBuf;

use alloc_trace_studio::commands::{
    display_schema, display_version, execute_analyze, validate_args, validate_report_file,
    AnalyzeArgs,
};
use alloc_trace_studio::utils::config::DEFAULT_BENCHMARKS_DIR;

/// Alloc Trace Studio - statistics for allocator benchmark traces
#[derive(Parser, Debug)]
#[command(name = "alloc-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze trace files and write JSON reports
    Analyze {
        /// Trace files or directories (directories are scanned for *.log)
        paths: Vec<PathBuf>,

        /// Directory scanned when no paths are given
        #[arg(long, env = "ALLOC_TRACE_DIR", default_value = DEFAULT_BENCHMARKS_DIR)]
        benchmarks_dir: PathBuf,

        /// Write reports here instead of next to each trace
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Tell the renderer to leave out the statistics box
        #[arg(long)]
        no_stats: bool,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Analyze {
            paths,
            benchmarks_dir,
            output_dir,
            no_stats,
            summary,
        } => {
            let inputs = if paths.is_empty() {
                vec![benchmarks_dir]
            } else {
                paths
            };

            let args = AnalyzeArgs {
                inputs,
                output_dir,
                include_statistics: !no_stats,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            let batch = execute_analyze(&args)?;

            if batch.all_failed() {
                anyhow::bail!("All {} trace file(s) failed to process", batch.failed.len());
            }
            if batch.processed() == 0 {
                warn!("No traces were processed");
            }
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
