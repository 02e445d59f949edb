//! Check command - report per-file outcomes without writing anything.

use std::path::PathBuf;

use colored::Colorize;

use super::{build_merger, print_outcomes, require_file};

pub fn run(
    archive: PathBuf,
    schema: Option<PathBuf>,
    json_output: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&archive)?;

    let merger = build_merger(schema, false, 0)?;
    let result = merger.merge_archive(&archive)?;

    if json_output {
        let status = serde_json::json!({
            "archive": archive.display().to_string(),
            "skipped": result.skipped,
            "files": result.report.files,
            "summary": result.report.summary,
            "sources": result.sources,
            "generated_at": result.generated_at,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Checking".cyan().bold(),
        archive.display().to_string().white()
    );
    println!();
    print_outcomes(&result);

    let summary = &result.report.summary;
    println!();
    println!(
        "{} of {} file(s) have every required column ({} rows)",
        summary.merged_files.to_string().white().bold(),
        summary.total_files,
        summary.merged_rows
    );
    if summary.read_failures > 0 {
        println!(
            "  {} file(s) could not be read",
            summary.read_failures.to_string().red()
        );
    }
    if summary.incomplete_files > 0 {
        println!(
            "  {} file(s) are missing columns",
            summary.incomplete_files.to_string().yellow()
        );
    }
    if summary.merged_files == 0 {
        println!("{}", "No files with complete columns to merge.".red());
    }

    Ok(())
}
