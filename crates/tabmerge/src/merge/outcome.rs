//! Per-file outcomes of a merge batch.

use serde::{Deserialize, Serialize};

use crate::input::DataTable;

/// How one input file was handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// The file could not be parsed into a table.
    ReadFailure { reason: String },
    /// The table lacks required columns and was left out of the merge.
    MissingColumns { columns: Vec<String> },
    /// The table was projected and contributed its rows to the merge.
    Merged { rows: usize },
}

impl FileOutcome {
    /// Get a human-readable label for the outcome.
    pub fn label(&self) -> &'static str {
        match self {
            FileOutcome::ReadFailure { .. } => "Read Failure",
            FileOutcome::MissingColumns { .. } => "Missing Columns",
            FileOutcome::Merged { .. } => "Merged",
        }
    }

    /// Whether the file made it into the merged table.
    pub fn is_merged(&self) -> bool {
        matches!(self, FileOutcome::Merged { .. })
    }
}

/// Outcome of one named file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub name: String,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

impl FileReport {
    /// One-line message for the user.
    pub fn message(&self) -> String {
        match &self.outcome {
            FileOutcome::ReadFailure { reason } => {
                format!("Error reading {}: {}", self.name, reason)
            }
            FileOutcome::MissingColumns { columns } => format!(
                "Skipped '{}' due to missing columns: {}",
                self.name,
                columns.join(", ")
            ),
            FileOutcome::Merged { rows } => format!("Read {} ({} rows)", self.name, rows),
        }
    }
}

/// One input to the coordinator: a file name and its parsed table, or the
/// reason parsing failed.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub name: String,
    pub table: std::result::Result<DataTable, String>,
}

impl ParsedFile {
    /// A successfully parsed file.
    pub fn parsed(name: impl Into<String>, table: DataTable) -> Self {
        Self {
            name: name.into(),
            table: Ok(table),
        }
    }

    /// A file that failed to parse upstream.
    pub fn failed(name: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            name: name.into(),
            table: Err(reason.to_string()),
        }
    }
}
