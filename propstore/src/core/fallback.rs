//! Version fallback ordering.
//!
//! Group labels compare as plain strings, so `"9.0" > "10.0"`. Callers that
//! need semantic ordering must choose labels that sort lexicographically.

/// Order `groups` for a fallback scan against `baseline`.
///
/// Returns labels from the lexicographically largest down, skipping the
/// unversioned (empty) group and any label greater than `baseline`.
pub fn fallback_candidates(mut groups: Vec<String>, baseline: &str) -> Vec<String> {
    groups.sort();
    groups
        .into_iter()
        .rev()
        .filter(|label| !label.is_empty() && label.as_str() <= baseline)
        .collect()
}

/// Labels shown by a full dump: descending, unversioned group excluded.
pub fn dump_order(mut groups: Vec<String>) -> Vec<String> {
    groups.sort();
    groups.into_iter().rev().filter(|label| !label.is_empty()).collect()
}
