//! CLI command implementations.

pub mod check;
pub mod merge;
pub mod schema;
pub mod serve;

use std::path::{Path, PathBuf};

use colored::Colorize;
use tabmerge::{ArchiveMerge, CanonicalSchema, FileOutcome, MergeConfig, TabMerge};

/// Load `--schema` if given, else the standard schema.
pub fn load_schema(path: Option<&Path>) -> Result<CanonicalSchema, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(CanonicalSchema::from_json_file(path)?),
        None => Ok(CanonicalSchema::standard().clone()),
    }
}

/// Build a merger from command-line options.
pub fn build_merger(
    schema: Option<PathBuf>,
    parallel: bool,
    preview_rows: usize,
) -> Result<TabMerge, Box<dyn std::error::Error>> {
    let config = MergeConfig {
        schema: load_schema(schema.as_deref())?,
        parallel,
        preview_rows,
        ..MergeConfig::default()
    };
    Ok(TabMerge::with_config(config))
}

/// Fail early with a readable message when the archive is missing.
pub fn require_file(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }
    Ok(())
}

/// Print one line per skipped entry and per file outcome.
pub fn print_outcomes(result: &ArchiveMerge) {
    for name in &result.skipped {
        println!(
            "{} Skipped unsupported file: {}",
            "Warning:".yellow().bold(),
            name
        );
    }

    for file in &result.report.files {
        let line = file.message();
        match file.outcome {
            FileOutcome::Merged { .. } => println!("  {} {}", "✓".green(), line),
            FileOutcome::MissingColumns { .. } => println!("  {} {}", "✗".red(), line.red()),
            FileOutcome::ReadFailure { .. } => println!("  {} {}", "✗".red(), line.red()),
        }
    }
}
