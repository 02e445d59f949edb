//! Merge command - merge an archive and write the result.

use std::path::PathBuf;

use colored::Colorize;
use tabmerge::{write_table, DataTable, MergeError, OutputFormat};

use super::{build_merger, print_outcomes, require_file};

#[allow(clippy::too_many_arguments)]
pub fn run(
    archive: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
    schema: Option<PathBuf>,
    preview: usize,
    parallel: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&archive)?;

    println!(
        "{} {}",
        "Merging".cyan().bold(),
        archive.display().to_string().white()
    );

    let merger = build_merger(schema, parallel, preview)?;
    let result = match merger.merge_archive(&archive) {
        Err(MergeError::EmptyArchive) => return Err("ZIP file is empty!".into()),
        other => other?,
    };

    println!(
        "Found {} files ({} skipped)",
        result.report.files.len().to_string().white().bold(),
        result.skipped.len()
    );
    print_outcomes(&result);

    if result.report.files.is_empty() {
        return Err("No valid CSV/Excel files found".into());
    }

    let summary = result.report.summary.clone();
    let merged = result.report.into_merged().map_err(|e| match e {
        MergeError::NoCompleteFiles { .. } => {
            Box::<dyn std::error::Error>::from("No files with complete columns to merge.")
        }
        other => Box::<dyn std::error::Error>::from(other),
    })?;

    println!();
    println!(
        "{} Merged {} files into {} rows",
        "Done:".green().bold(),
        summary.merged_files.to_string().white().bold(),
        summary.merged_rows.to_string().white().bold()
    );

    if preview > 0 {
        println!();
        println!("{}", "Preview of Merged Data".yellow().bold());
        print_preview(&merged.head(preview), verbose);
    }

    let output_path = output.unwrap_or_else(|| archive.with_file_name(format.default_file_name()));
    write_table(&merged, &output_path, format)?;

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(())
}

/// Print rows as aligned columns. Cells are clipped unless verbose.
fn print_preview(table: &DataTable, verbose: bool) {
    const MAX_CELL: usize = 18;

    let clip = |s: &str| -> String {
        if verbose || s.chars().count() <= MAX_CELL {
            s.to_string()
        } else {
            let head: String = s.chars().take(MAX_CELL - 1).collect();
            format!("{}…", head)
        }
    };

    let header: Vec<String> = table.headers.iter().map(|h| clip(h)).collect();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|r| r.iter().map(|c| clip(c)).collect())
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(header[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:w$}", c, w = *w))
            .collect::<Vec<_>>()
            .join(" │ ")
    };

    println!("  {}", line(&header).bold());
    for row in &rows {
        println!("  {}", line(row));
    }
}
