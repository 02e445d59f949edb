//! Schema command - list the required columns.

use std::path::PathBuf;

use colored::Colorize;

use super::load_schema;

pub fn run(
    schema: Option<PathBuf>,
    json_output: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = load_schema(schema.as_deref())?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    println!(
        "{} ({} columns)",
        "Required columns".cyan().bold(),
        schema.len()
    );
    for (i, column) in schema.columns().iter().enumerate() {
        println!(
            "  {:>2}. {:40} {}",
            i + 1,
            column.label(),
            column.normalized().dimmed()
        );
    }

    Ok(())
}
