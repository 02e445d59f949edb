//! Projection of a validated table onto the canonical column order.

use super::canonical::CanonicalSchema;
use super::normalize::NormalizedHeader;
use crate::error::{MergeError, Result};
use crate::input::DataTable;

/// Project `table` onto `schema`.
///
/// The result has exactly the schema's columns, in schema order, under the
/// schema's literal labels. Each column takes its values unmodified from the
/// first source column with a matching normalized label; every other source
/// column is dropped.
///
/// `header` must be built from `table.headers`. A schema column absent from
/// it yields [`MergeError::Projection`]; callers are expected to have run
/// [`missing_columns`](super::missing_columns) first.
pub fn project(
    table: DataTable,
    header: &NormalizedHeader,
    schema: &CanonicalSchema,
) -> Result<DataTable> {
    let positions = schema
        .columns()
        .iter()
        .map(|column| {
            header
                .position(column.normalized())
                .ok_or_else(|| MergeError::Projection {
                    column: column.label().to_string(),
                })
        })
        .collect::<Result<Vec<usize>>>()?;

    // Positions are distinct because schema labels are distinct after
    // normalization, so each source cell is taken at most once.
    let rows = table
        .rows
        .into_iter()
        .map(|mut row| {
            positions
                .iter()
                .map(|&p| row.get_mut(p).map(std::mem::take).unwrap_or_default())
                .collect::<Vec<String>>()
        })
        .collect();

    Ok(DataTable::new(schema.labels(), rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> CanonicalSchema {
        CanonicalSchema::new(["External Code", "Price - Current", "Date"]).unwrap()
    }

    fn project_raw(headers: &[&str], rows: &[&[&str]]) -> Result<DataTable> {
        let table = DataTable::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        );
        let header = NormalizedHeader::from_headers(&table.headers);
        project(table, &header, &schema())
    }

    #[test]
    fn test_project_reorders_and_restores_casing() {
        let projected = project_raw(
            &["date", "PRICE-current", "external code"],
            &[&["2024-01-01", "9.99", "X1"], &["2024-01-02", "1.50", "X2"]],
        )
        .unwrap();

        assert_eq!(
            projected.headers,
            vec!["External Code", "Price - Current", "Date"]
        );
        assert_eq!(projected.rows[0], vec!["X1", "9.99", "2024-01-01"]);
        assert_eq!(projected.rows[1], vec!["X2", "1.50", "2024-01-02"]);
    }

    #[test]
    fn test_project_drops_extra_columns() {
        let projected = project_raw(
            &["Notes", "External Code", "Price - Current", "Date", "Owner"],
            &[&["n", "X1", "2", "d", "o"]],
        )
        .unwrap();

        assert_eq!(projected.column_count(), 3);
        assert_eq!(projected.rows[0], vec!["X1", "2", "d"]);
    }

    #[test]
    fn test_project_first_duplicate_wins() {
        let projected = project_raw(
            &["Date", "External Code", "Price - Current", "date"],
            &[&["first", "X1", "2", "second"]],
        )
        .unwrap();

        assert_eq!(projected.get(0, 2), Some("first"));
    }

    #[test]
    fn test_project_values_untouched() {
        let projected = project_raw(
            &["External Code", "Price - Current", "Date"],
            &[&["  007 ", "", "N/A"]],
        )
        .unwrap();

        assert_eq!(projected.rows[0], vec!["  007 ", "", "N/A"]);
    }

    #[test]
    fn test_project_short_row_pads_blank() {
        let projected =
            project_raw(&["External Code", "Price - Current", "Date"], &[&["X1"]]).unwrap();
        assert_eq!(projected.rows[0], vec!["X1", "", ""]);
    }

    #[test]
    fn test_project_missing_column_is_internal_error() {
        let err = project_raw(&["External Code", "Date"], &[&["X1", "d"]]).unwrap_err();
        match err {
            MergeError::Projection { column } => assert_eq!(column, "Price - Current"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
