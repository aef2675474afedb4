//! Display ordering for facet option values.

use std::cmp::Ordering;

/// Orders strings the way option lists are shown.
///
/// Case-insensitive first, then by the raw string, so the order is total
/// and never depends on how the values were collected.
pub fn display_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sorts and deduplicates option values.
pub fn sorted_unique<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut values: Vec<String> = values.into_iter().collect();
    values.sort_by(|a, b| display_cmp(a, b));
    values.dedup();
    values
}
