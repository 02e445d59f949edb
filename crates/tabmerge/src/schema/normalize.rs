//! Column label normalization.
//!
//! A normalized label is only ever used for matching. Two labels name the
//! same column iff their normalized forms are equal.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// Any whitespace run on either side of a hyphen.
static HYPHEN_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*-\s*").unwrap());

/// Normalize one column label.
///
/// Trims surrounding whitespace, rewrites the spacing around every hyphen to
/// exactly one space on each side, then lower-cases.
///
/// ```
/// use tabmerge::schema::normalize_label;
///
/// assert_eq!(normalize_label("  Price-Current "), "price - current");
/// assert_eq!(normalize_label("GIC"), "gic");
/// ```
pub fn normalize_label(label: &str) -> String {
    HYPHEN_SPACING
        .replace_all(label.trim(), " - ")
        .to_lowercase()
}

/// Normalize a whole header, position for position.
pub fn normalize_headers<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    labels.iter().map(|l| normalize_label(l.as_ref())).collect()
}

/// A table header keyed by normalized label.
///
/// When several raw labels normalize to the same form, the first occurrence
/// wins and later ones are ignored.
#[derive(Debug, Clone, Default)]
pub struct NormalizedHeader {
    positions: IndexMap<String, usize>,
    width: usize,
}

impl NormalizedHeader {
    /// Index a raw header.
    pub fn from_headers<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut positions = IndexMap::with_capacity(labels.len());
        for (position, label) in normalize_headers(labels).into_iter().enumerate() {
            positions.entry(label).or_insert(position);
        }

        Self {
            positions,
            width: labels.len(),
        }
    }

    /// Whether a normalized label is present.
    pub fn contains(&self, normalized: &str) -> bool {
        self.positions.contains_key(normalized)
    }

    /// Position of the first source column with this normalized label.
    pub fn position(&self, normalized: &str) -> Option<usize> {
        self.positions.get(normalized).copied()
    }

    /// Distinct normalized labels, in first-seen order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(|k| k.as_str())
    }

    /// Number of raw columns the header was built from.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of raw columns shadowed by an earlier duplicate.
    pub fn duplicate_count(&self) -> usize {
        self.width - self.positions.len()
    }
}
