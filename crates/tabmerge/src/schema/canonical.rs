//! The canonical schema every merged file is projected onto.

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::normalize::normalize_label;
use crate::error::{MergeError, Result};

/// Required columns of the standard product-listing export, in output order.
///
/// These strings become the merged file's header verbatim.
pub const STANDARD_COLUMNS: [&str; 16] = [
    "External Code",
    "Processing Group Code",
    "Processing Group Description",
    "Best External Description - Current",
    "Current Nielsen Item ID",
    "Predicted Barcode - Current",
    "Price - Current",
    "Retailer SKU - Current",
    "Module",
    "Brand",
    "URL",
    "Category",
    "Allocation",
    "Yes/No",
    "GIC",
    "Date",
];

static STANDARD: Lazy<CanonicalSchema> = Lazy::new(|| CanonicalSchema {
    columns: STANDARD_COLUMNS.iter().map(|l| CanonicalColumn::new(*l)).collect(),
});

/// One required column: its display label and matching key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalColumn {
    label: String,
    normalized: String,
}

impl CanonicalColumn {
    fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let normalized = normalize_label(&label);
        Self { label, normalized }
    }

    /// Literal label used in output headers.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Normalized form used for matching.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

/// On-disk shape of a custom schema.
#[derive(Debug, Deserialize)]
struct SchemaFile {
    columns: Vec<String>,
}

/// Ordered set of required columns.
///
/// Built once and never mutated; normalized forms are computed at
/// construction so per-file checks never recompute them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CanonicalSchema {
    columns: Vec<CanonicalColumn>,
}

impl CanonicalSchema {
    /// Build a schema from display labels.
    ///
    /// Fails on an empty list, or when two labels normalize to the same form
    /// (they could never be told apart in an input file).
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<CanonicalColumn> = labels.into_iter().map(CanonicalColumn::new).collect();

        if columns.is_empty() {
            return Err(MergeError::Config("Schema has no columns".to_string()));
        }

        {
            let mut seen = HashSet::new();
            for column in &columns {
                if column.normalized.is_empty() {
                    return Err(MergeError::Config("Schema has a blank column label".to_string()));
                }
                if !seen.insert(column.normalized.as_str()) {
                    return Err(MergeError::Config(format!(
                        "Schema column '{}' duplicates another column after normalization",
                        column.label
                    )));
                }
            }
        }

        Ok(Self { columns })
    }

    /// The process-wide standard 16-column schema.
    pub fn standard() -> &'static CanonicalSchema {
        &STANDARD
    }

    /// Load a schema from a JSON file of the form `{"columns": [...]}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| MergeError::io(path, e))?;
        let file: SchemaFile = serde_json::from_str(&contents)?;
        Self::new(file.columns)
    }

    /// Columns in output order.
    pub fn columns(&self) -> &[CanonicalColumn] {
        &self.columns
    }

    /// Display labels in output order.
    pub fn labels(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.label.clone()).collect()
    }

    /// Number of required columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false for a constructed schema.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Default for CanonicalSchema {
    fn default() -> Self {
        Self::standard().clone()
    }
}
