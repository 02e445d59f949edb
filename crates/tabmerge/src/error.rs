//! Error types for the tabmerge library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tabmerge operations.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error reading an Excel workbook.
    #[error("Excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// Error writing an Excel workbook.
    #[error("Excel write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Error reading the ZIP archive.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no header to read.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// The archive has no entries at all.
    #[error("ZIP file is empty")]
    EmptyArchive,

    /// No file in the batch had every canonical column.
    #[error("No files with complete columns to merge ({files} file(s) checked)")]
    NoCompleteFiles { files: usize },

    /// A table reached projection without one of the canonical columns.
    ///
    /// This is an internal invariant failure: the coordinator validates
    /// before it projects.
    #[error("Internal error: cannot project missing column '{column}'")]
    Projection { column: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MergeError {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MergeError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for tabmerge operations.
pub type Result<T> = std::result::Result<T, MergeError>;
