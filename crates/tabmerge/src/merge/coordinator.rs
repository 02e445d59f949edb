//! Batch merge: normalize, validate and project each file, then stack the
//! survivors.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::outcome::{FileOutcome, FileReport, ParsedFile};
use crate::error::{MergeError, Result};
use crate::input::DataTable;
use crate::schema::{missing_columns, project, CanonicalSchema, NormalizedHeader};

/// Counts over a finished batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub total_files: usize,
    pub merged_files: usize,
    pub read_failures: usize,
    pub incomplete_files: usize,
    pub merged_rows: usize,
}

/// Result of merging a batch.
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    /// One report per input file, in input order.
    pub files: Vec<FileReport>,
    pub summary: MergeSummary,
    /// Concatenation of every merged file; `None` when nothing qualified.
    #[serde(skip)]
    pub merged: Option<DataTable>,
}

impl MergeReport {
    /// The merged table, if any file qualified.
    pub fn merged(&self) -> Option<&DataTable> {
        self.merged.as_ref()
    }

    /// Take the merged table, or fail with [`MergeError::NoCompleteFiles`].
    pub fn into_merged(self) -> Result<DataTable> {
        let files = self.summary.total_files;
        self.merged.ok_or(MergeError::NoCompleteFiles { files })
    }
}

/// What one file's pass through the pipeline produced.
enum FileStep {
    Rejected(FileReport),
    Accepted(FileReport, DataTable),
}

/// Runs a batch of parsed files through the merge pipeline.
#[derive(Debug, Clone, Copy)]
pub struct BatchMerger<'a> {
    schema: &'a CanonicalSchema,
    parallel: bool,
}

impl<'a> BatchMerger<'a> {
    /// Create a sequential merger for `schema`.
    pub fn new(schema: &'a CanonicalSchema) -> Self {
        Self {
            schema,
            parallel: false,
        }
    }

    /// Process files on the rayon pool. Output order is unchanged.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Merge `files` in order.
    ///
    /// Per-file problems become [`FileOutcome`]s and never stop the batch.
    /// The only error is an internal projection failure.
    pub fn merge(&self, files: Vec<ParsedFile>) -> Result<MergeReport> {
        let steps: Vec<Result<FileStep>> = if self.parallel {
            files.into_par_iter().map(|f| self.process(f)).collect()
        } else {
            files.into_iter().map(|f| self.process(f)).collect()
        };

        let mut summary = MergeSummary::default();
        let mut reports = Vec::with_capacity(steps.len());
        let mut survivors = Vec::new();

        for step in steps {
            summary.total_files += 1;
            match step? {
                FileStep::Rejected(report) => {
                    match report.outcome {
                        FileOutcome::ReadFailure { .. } => summary.read_failures += 1,
                        _ => summary.incomplete_files += 1,
                    }
                    reports.push(report);
                }
                FileStep::Accepted(report, table) => {
                    summary.merged_files += 1;
                    summary.merged_rows += table.row_count();
                    reports.push(report);
                    survivors.push(table);
                }
            }
        }

        // Projection gives every survivor the schema's headers, so
        // concatenation is plain row stacking.
        let merged = DataTable::concat(survivors);

        if merged.is_some() {
            info!(
                files = summary.merged_files,
                rows = summary.merged_rows,
                "merged batch"
            );
        } else {
            warn!(files = summary.total_files, "no files with complete columns");
        }

        Ok(MergeReport {
            files: reports,
            summary,
            merged,
        })
    }

    fn process(&self, file: ParsedFile) -> Result<FileStep> {
        let ParsedFile { name, table } = file;

        let table = match table {
            Ok(table) => table,
            Err(reason) => {
                warn!(file = %name, %reason, "read failure");
                let outcome = FileOutcome::ReadFailure { reason };
                return Ok(FileStep::Rejected(FileReport { name, outcome }));
            }
        };

        let header = NormalizedHeader::from_headers(&table.headers);
        if header.duplicate_count() > 0 {
            debug!(
                file = %name,
                duplicates = header.duplicate_count(),
                "duplicate normalized labels; first occurrence wins"
            );
        }

        let missing = missing_columns(&header, self.schema);
        if !missing.is_empty() {
            let columns: Vec<String> = missing.iter().map(|c| c.label().to_string()).collect();
            warn!(file = %name, missing = ?columns, "missing columns");
            let outcome = FileOutcome::MissingColumns { columns };
            return Ok(FileStep::Rejected(FileReport { name, outcome }));
        }

        let projected = project(table, &header, self.schema)?;
        debug!(file = %name, rows = projected.row_count(), "projected");

        let outcome = FileOutcome::Merged {
            rows: projected.row_count(),
        };
        Ok(FileStep::Accepted(FileReport { name, outcome }, projected))
    }
}

/// Merge `files` against `schema` sequentially.
pub fn merge_batch(files: Vec<ParsedFile>, schema: &CanonicalSchema) -> Result<MergeReport> {
    BatchMerger::new(schema).merge(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> CanonicalSchema {
        CanonicalSchema::new(["Code", "Price - Current", "GIC"]).unwrap()
    }

    fn table(headers: &[&str], rows: usize, tag: &str) -> DataTable {
        DataTable::new(
            headers.iter().map(|s| s.to_string()).collect(),
            (0..rows)
                .map(|i| headers.iter().map(|h| format!("{tag}-{h}-{i}")).collect())
                .collect(),
        )
    }

    #[test]
    fn test_merge_mixed_batch() {
        let schema = schema();
        let files = vec![
            ParsedFile::parsed("a.csv", table(&["gic", "code", "price-current"], 3, "a")),
            ParsedFile::parsed("b.csv", table(&["Code", "Price - Current"], 2, "b")),
            ParsedFile::failed("c.xlsx", "Excel error: corrupt"),
            ParsedFile::parsed("d.csv", table(&["CODE", "GIC", "Price-Current", "x"], 1, "d")),
        ];

        let report = merge_batch(files, &schema).unwrap();

        assert_eq!(report.files.len(), 4);
        assert_eq!(report.files[0].outcome, FileOutcome::Merged { rows: 3 });
        assert_eq!(
            report.files[1].outcome,
            FileOutcome::MissingColumns {
                columns: vec!["GIC".to_string()]
            }
        );
        assert!(matches!(
            report.files[2].outcome,
            FileOutcome::ReadFailure { .. }
        ));
        assert_eq!(report.files[3].outcome, FileOutcome::Merged { rows: 1 });

        assert_eq!(
            report.summary,
            MergeSummary {
                total_files: 4,
                merged_files: 2,
                read_failures: 1,
                incomplete_files: 1,
                merged_rows: 4,
            }
        );

        let merged = report.into_merged().unwrap();
        assert_eq!(merged.headers, vec!["Code", "Price - Current", "GIC"]);
        assert_eq!(merged.row_count(), 4);
        assert_eq!(merged.get(0, 0), Some("a-code-0"));
        assert_eq!(merged.get(3, 0), Some("d-CODE-0"));
    }

    #[test]
    fn test_all_invalid_batch() {
        let schema = schema();
        let files = vec![
            ParsedFile::parsed("a.csv", table(&["Code"], 2, "a")),
            ParsedFile::parsed("b.csv", table(&["GIC"], 2, "b")),
        ];

        let report = merge_batch(files, &schema).unwrap();
        assert!(report.merged().is_none());
        assert_eq!(report.files.len(), 2);
        assert!(report
            .files
            .iter()
            .all(|f| matches!(f.outcome, FileOutcome::MissingColumns { .. })));
        assert!(matches!(
            report.into_merged(),
            Err(MergeError::NoCompleteFiles { files: 2 })
        ));
    }

    #[test]
    fn test_empty_batch() {
        let report = merge_batch(Vec::new(), &schema()).unwrap();
        assert!(report.files.is_empty());
        assert!(report.merged().is_none());
        assert_eq!(report.summary, MergeSummary::default());
    }

    #[test]
    fn test_zero_row_table_still_merges() {
        let schema = schema();
        let files = vec![ParsedFile::parsed(
            "empty.csv",
            table(&["Code", "Price - Current", "GIC"], 0, "e"),
        )];

        let report = merge_batch(files, &schema).unwrap();
        assert_eq!(report.files[0].outcome, FileOutcome::Merged { rows: 0 });
        assert_eq!(report.into_merged().unwrap().row_count(), 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let schema = schema();
        let files: Vec<ParsedFile> = (0..20)
            .map(|i| {
                let headers: &[&str] = if i % 3 == 0 {
                    &["Code", "GIC"]
                } else {
                    &["GIC", "Price-Current", "Code"]
                };
                ParsedFile::parsed(format!("f{i}.csv"), table(headers, i % 4, &i.to_string()))
            })
            .collect();

        let sequential = BatchMerger::new(&schema).merge(files.clone()).unwrap();
        let parallel = BatchMerger::new(&schema)
            .parallel(true)
            .merge(files)
            .unwrap();

        assert_eq!(sequential.files, parallel.files);
        assert_eq!(sequential.summary, parallel.summary);
        assert_eq!(sequential.merged, parallel.merged);
    }
}
