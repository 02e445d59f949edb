//! Canonical schema, label normalization, validation and projection.

mod canonical;
mod normalize;
mod reorder;
mod validate;

pub use canonical::{CanonicalColumn, CanonicalSchema, STANDARD_COLUMNS};
pub use normalize::{normalize_headers, normalize_label, NormalizedHeader};
pub use reorder::project;
pub use validate::{missing_columns, missing_normalized};
