//! TabMerge: consolidate a batch of similarly-shaped spreadsheets.
//!
//! A ZIP of CSV/Excel files goes in; one table with a fixed canonical header
//! comes out. Column labels are matched case-insensitively and without regard
//! to the spacing around hyphens, so `price-current` and `Price - Current`
//! are the same column.
//!
//! # Core Principles
//!
//! - **Partial failure**: a bad file is reported and skipped, never fatal
//! - **Projection, not coercion**: cell values pass through untouched
//! - **Stable order**: files and rows keep their input order
//!
//! # Example
//!
//! ```no_run
//! use tabmerge::TabMerge;
//!
//! let merger = TabMerge::new();
//! let result = merger.merge_archive("exports.zip").unwrap();
//!
//! for file in &result.report.files {
//!     println!("{}", file.message());
//! }
//! let merged = result.report.into_merged().unwrap();
//! println!("Rows: {}", merged.row_count());
//! ```

pub mod error;
pub mod input;
pub mod merge;
pub mod output;
pub mod schema;

mod pipeline;

pub use crate::pipeline::{ArchiveMerge, MergeConfig, TabMerge};
pub use error::{MergeError, Result};
pub use input::{DataTable, FileKind, Parser, ParserConfig, SourceMetadata};
pub use merge::{merge_batch, BatchMerger, FileOutcome, FileReport, MergeReport, MergeSummary, ParsedFile};
pub use output::{table_to_bytes, write_table, OutputFormat};
pub use schema::{normalize_label, CanonicalColumn, CanonicalSchema, NormalizedHeader, STANDARD_COLUMNS};
