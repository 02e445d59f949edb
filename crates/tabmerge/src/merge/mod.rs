//! Batch merging of parsed tables into one canonical table.

mod coordinator;
mod outcome;

pub use coordinator::{merge_batch, BatchMerger, MergeReport, MergeSummary};
pub use outcome::{FileOutcome, FileReport, ParsedFile};
