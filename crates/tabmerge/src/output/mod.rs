//! Serialization of merged tables.

use std::path::Path;

use indexmap::IndexMap;
use rust_xlsxwriter::Workbook;

use crate::error::{MergeError, Result};
use crate::input::DataTable;

/// Base name of the merged output file.
pub const DEFAULT_OUTPUT_STEM: &str = "merged_data";

/// Worksheet name used for xlsx output.
const SHEET_NAME: &str = "Merged Data";

/// File format for the merged table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    Json,
    Xlsx,
}

impl OutputFormat {
    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
            OutputFormat::Xlsx => "xlsx",
        }
    }

    /// MIME type for downloads.
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv; charset=utf-8",
            OutputFormat::Tsv => "text/tab-separated-values; charset=utf-8",
            OutputFormat::Json => "application/json",
            OutputFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Default output file name, e.g. `merged_data.csv`.
    pub fn default_file_name(&self) -> String {
        format!("{}.{}", DEFAULT_OUTPUT_STEM, self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            "xlsx" => Ok(OutputFormat::Xlsx),
            _ => Err(format!("Unknown format: {}. Use csv, tsv, json, or xlsx.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Serialize a table to bytes.
pub fn table_to_bytes(table: &DataTable, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => delimited(table, b','),
        OutputFormat::Tsv => delimited(table, b'\t'),
        OutputFormat::Json => {
            let records: Vec<IndexMap<&str, &str>> = table
                .rows
                .iter()
                .map(|row| {
                    table
                        .headers
                        .iter()
                        .zip(row.iter())
                        .map(|(h, v)| (h.as_str(), v.as_str()))
                        .collect()
                })
                .collect();
            Ok(serde_json::to_vec_pretty(&records)?)
        }
        OutputFormat::Xlsx => workbook(table),
    }
}

/// Write a table to `path`.
pub fn write_table(table: &DataTable, path: impl AsRef<Path>, format: OutputFormat) -> Result<()> {
    let path = path.as_ref();
    let bytes = table_to_bytes(table, format)?;
    std::fs::write(path, bytes).map_err(|e| MergeError::io(path, e))
}

fn delimited(table: &DataTable, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| MergeError::io("<buffer>", e.into_error()))
}

/// Single-sheet workbook: header row, then every cell as a string.
fn workbook(table: &DataTable) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, header) in table.headers.iter().enumerate() {
        sheet.write_string(0, col as u16, header.as_str())?;
    }
    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = row_idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            sheet.write_string(row_num, col as u16, cell.as_str())?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataTable {
        DataTable::new(
            vec!["Price - Current".to_string(), "Brand".to_string()],
            vec![
                vec!["1.50".to_string(), "Acme, Inc".to_string()],
                vec!["2".to_string(), "Zed".to_string()],
            ],
        )
    }

    #[test]
    fn test_format_parse_and_display() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("tsv".parse::<OutputFormat>().unwrap(), OutputFormat::Tsv);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("XLSX".parse::<OutputFormat>().unwrap(), OutputFormat::Xlsx);
        assert!("xls".parse::<OutputFormat>().is_err());
        assert!("parquet".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Csv.default_file_name(), "merged_data.csv");
        assert_eq!(OutputFormat::Xlsx.default_file_name(), "merged_data.xlsx");
        assert_eq!(
            OutputFormat::Xlsx.content_type(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
    }

    #[test]
    fn test_csv_output_quotes_and_header() {
        let bytes = table_to_bytes(&sample(), OutputFormat::Csv).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "Price - Current,Brand\n1.50,\"Acme, Inc\"\n2,Zed\n");
    }

    #[test]
    fn test_tsv_output() {
        let bytes = table_to_bytes(&sample(), OutputFormat::Tsv).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("Price - Current\tBrand\n"));
    }

    #[test]
    fn test_json_output_keeps_column_order() {
        let bytes = table_to_bytes(&sample(), OutputFormat::Json).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let price = text.find("Price - Current").unwrap();
        let brand = text.find("Brand").unwrap();
        assert!(price < brand);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["Brand"], "Acme, Inc");
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_write_table_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_table(&sample(), &path, OutputFormat::Csv).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Price - Current,Brand"));
    }

    #[test]
    fn test_xlsx_output_reads_back() {
        let table = sample();
        let bytes = table_to_bytes(&table, OutputFormat::Xlsx).unwrap();
        assert!(bytes.starts_with(b"PK"));

        let (parsed, metadata) = crate::input::Parser::new()
            .parse_bytes("merged_data.xlsx", &bytes)
            .unwrap();
        assert_eq!(parsed, table);
        assert_eq!(metadata.format, "xlsx");
    }

    #[test]
    fn test_xlsx_keeps_numeric_looking_text() {
        let table = DataTable::new(
            vec!["External Code".to_string()],
            vec![vec!["007".to_string()], vec!["1.50".to_string()]],
        );
        let bytes = table_to_bytes(&table, OutputFormat::Xlsx).unwrap();
        let (parsed, _) = crate::input::Parser::new()
            .parse_bytes("codes.xlsx", &bytes)
            .unwrap();
        assert_eq!(parsed.column_by_name("External Code"), Some(vec!["007", "1.50"]));
    }
}
