//! Parsed table representation and source metadata.

use serde::{Deserialize, Serialize};

/// Metadata about one parsed input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name as it appeared in the archive (or on disk).
    pub file: String,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, xlsx, ...).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
}

impl SourceMetadata {
    /// Create metadata for a file that has been parsed.
    pub fn new(
        file: impl Into<String>,
        hash: String,
        size_bytes: u64,
        format: impl Into<String>,
        table: &DataTable,
    ) -> Self {
        Self {
            file: file.into(),
            hash,
            size_bytes,
            format: format.into(),
            row_count: table.row_count(),
            column_count: table.column_count(),
        }
    }
}

/// Represents parsed tabular data.
///
/// Cells are kept as the strings the parser produced; nothing downstream
/// coerces them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a column by its exact header.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.headers.iter().position(|h| h == name)?;
        Some(self.column_values(index).collect())
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Copy of the first `n` rows.
    pub fn head(&self, n: usize) -> DataTable {
        DataTable {
            headers: self.headers.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Stack tables on top of each other, in order.
    ///
    /// Every table must carry the same headers as the first one. Returns
    /// `None` when given no tables or when the headers disagree.
    pub fn concat(tables: impl IntoIterator<Item = DataTable>) -> Option<DataTable> {
        let mut tables = tables.into_iter();
        let mut merged = tables.next()?;

        for table in tables {
            if table.headers != merged.headers {
                return None;
            }
            merged.rows.extend(table.rows);
        }

        Some(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> DataTable {
        DataTable::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_concat_stacks_rows_in_order() {
        let a = table(&["x", "y"], &[&["1", "2"]]);
        let b = table(&["x", "y"], &[&["3", "4"], &["5", "6"]]);

        let merged = DataTable::concat(vec![a, b]).unwrap();
        assert_eq!(merged.row_count(), 3);
        assert_eq!(merged.column_by_name("x"), Some(vec!["1", "3", "5"]));
    }

    #[test]
    fn test_concat_rejects_mismatched_headers() {
        let a = table(&["x", "y"], &[&["1", "2"]]);
        let b = table(&["y", "x"], &[&["3", "4"]]);
        assert!(DataTable::concat(vec![a, b]).is_none());
    }

    #[test]
    fn test_concat_empty() {
        assert!(DataTable::concat(Vec::new()).is_none());
    }

    #[test]
    fn test_head() {
        let t = table(&["x"], &[&["1"], &["2"], &["3"]]);
        let head = t.head(2);
        assert_eq!(head.row_count(), 2);
        assert_eq!(head.get(1, 0), Some("2"));
        assert_eq!(t.head(10).row_count(), 3);
    }

    #[test]
    fn test_get_out_of_range() {
        let t = table(&["x"], &[&["1"]]);
        assert_eq!(t.get(0, 1), None);
        assert_eq!(t.get(1, 0), None);
    }
}
