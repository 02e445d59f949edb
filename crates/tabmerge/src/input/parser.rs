//! CSV and Excel parsing with file-type dispatch.

use std::fmt;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::{NaiveDateTime, NaiveTime};
use sha2::{Digest, Sha256};

use super::source::{DataTable, SourceMetadata};
use crate::error::{MergeError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Kind of tabular file, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Excel,
}

impl FileKind {
    /// Classify a file name by its extension (`.csv`, `.xlsx`, `.xls`).
    ///
    /// Returns `None` for anything else.
    pub fn from_name(name: &str) -> Option<FileKind> {
        let ext = Path::new(name)
            .extension()?
            .to_string_lossy()
            .to_lowercase();

        match ext.as_str() {
            "csv" => Some(FileKind::Csv),
            "xlsx" | "xls" => Some(FileKind::Excel),
            _ => None,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Csv => write!(f, "csv"),
            FileKind::Excel => write!(f, "excel"),
        }
    }
}

/// Parser configuration.
///
/// The first row of every file is its header.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use for CSV files (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses tabular data files.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file from disk.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();
        let contents = std::fs::read(path).map_err(|e| MergeError::io(path, e))?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.parse_bytes(&name, &contents)
    }

    /// Parse the contents of a named file, dispatching on its extension.
    pub fn parse_bytes(&self, name: &str, bytes: &[u8]) -> Result<(DataTable, SourceMetadata)> {
        let kind = FileKind::from_name(name)
            .ok_or_else(|| MergeError::UnsupportedFormat(name.to_string()))?;

        let (table, format) = match kind {
            FileKind::Csv => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                let delimiter = match self.config.delimiter {
                    Some(d) => d,
                    None => detect_delimiter(bytes)?,
                };
                let format = match delimiter {
                    b'\t' => "tsv",
                    b',' => "csv",
                    b';' => "csv-semicolon",
                    b'|' => "psv",
                    _ => "delimited",
                };
                (self.parse_delimited(bytes, delimiter)?, format.to_string())
            }
            FileKind::Excel => {
                let format = Path::new(name)
                    .extension()
                    .map(|e| e.to_string_lossy().to_lowercase())
                    .unwrap_or_else(|| "xlsx".to_string());
                (self.parse_workbook(bytes)?, format)
            }
        };

        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let metadata = SourceMetadata::new(name, hash, bytes.len() as u64, format, &table);
        Ok((table, metadata))
    }

    /// Parse delimited text.
    fn parse_delimited(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            let record = result?;
            records.push(record.iter().map(|s| s.to_string()).collect::<Vec<_>>());
        }

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();

        self.finish(DataTable::new(headers, records))
    }

    /// Parse the first worksheet of an .xlsx/.xls workbook.
    fn parse_workbook(&self, bytes: &[u8]) -> Result<DataTable> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| MergeError::EmptyData("Workbook has no worksheets".to_string()))??;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(render_cell).collect::<Vec<String>>());

        let headers = rows.next().unwrap_or_default();

        let limit = self.config.max_rows.unwrap_or(usize::MAX);
        let records: Vec<Vec<String>> = rows.take(limit).collect();

        self.finish(DataTable::new(headers, records))
    }

    /// Reject header-less tables and square up ragged rows.
    fn finish(&self, mut table: DataTable) -> Result<DataTable> {
        if table.headers.is_empty() {
            return Err(MergeError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = table.headers.len();
        for row in &mut table.rows {
            // Pad short rows, truncate long ones
            row.resize(expected_cols, String::new());
        }

        Ok(table)
    }
}

/// Render a worksheet cell as text.
///
/// Date cells are stored as serial numbers; they are rendered as
/// `YYYY-MM-DD`, with the time appended when it is not midnight.
fn render_cell(cell: &Data) -> String {
    match cell {
        Data::DateTime(value) => value
            .as_datetime()
            .map(format_datetime)
            .unwrap_or_else(|| cell.to_string()),
        Data::DateTimeIso(text) => text
            .parse::<NaiveDateTime>()
            .map(format_datetime)
            .unwrap_or_else(|_| text.clone()),
        _ => cell.to_string(),
    }
}

fn format_datetime(dt: NaiveDateTime) -> String {
    if dt.time() == NaiveTime::MIN {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(MergeError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tab gets a small bonus
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
