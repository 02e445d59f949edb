//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tabmerge::OutputFormat;

/// TabMerge: merge a ZIP of CSV/Excel files into one table
#[derive(Parser)]
#[command(name = "tabmerge")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge every CSV/Excel file in a ZIP archive
    Merge {
        /// Path to the ZIP archive
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,

        /// Output path (default: merged_data.<format> next to the archive)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (csv, tsv, json, xlsx)
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,

        /// JSON file with a custom column list ({"columns": [...]})
        #[arg(long, value_name = "FILE")]
        schema: Option<PathBuf>,

        /// Number of merged rows to preview
        #[arg(long, default_value = "10")]
        preview: usize,

        /// Process files in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Report which files in an archive would merge, without writing output
    Check {
        /// Path to the ZIP archive
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,

        /// JSON file with a custom column list ({"columns": [...]})
        #[arg(long, value_name = "FILE")]
        schema: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the required columns
    Schema {
        /// JSON file with a custom column list ({"columns": [...]})
        #[arg(long, value_name = "FILE")]
        schema: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open the upload-and-download web UI
    Serve {
        /// Port for web server
        #[arg(short, long, default_value = "3141")]
        port: u16,

        /// Don't automatically open browser
        #[arg(long)]
        no_open: bool,

        /// JSON file with a custom column list ({"columns": [...]})
        #[arg(long, value_name = "FILE")]
        schema: Option<PathBuf>,
    },
}
