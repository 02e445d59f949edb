//! Missing-column detection against the canonical schema.

use super::canonical::{CanonicalColumn, CanonicalSchema};
use super::normalize::NormalizedHeader;

/// Required columns absent from a header, in canonical order.
///
/// An empty result means the table can be merged. Duplicated labels in the
/// header are not an error here; only absence is checked.
pub fn missing_columns<'s>(
    header: &NormalizedHeader,
    schema: &'s CanonicalSchema,
) -> Vec<&'s CanonicalColumn> {
    schema
        .columns()
        .iter()
        .filter(|column| !header.contains(column.normalized()))
        .collect()
}

/// Normalized-label form of [`missing_columns`].
pub fn missing_normalized<'s>(
    header: &NormalizedHeader,
    schema: &'s CanonicalSchema,
) -> Vec<&'s str> {
    missing_columns(header, schema)
        .into_iter()
        .map(|c| c.normalized())
        .collect()
}
