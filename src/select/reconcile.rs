use crate::catalog::states::is_state;
use itertools::Itertools;
use std::collections::HashSet;

/// Drop identifiers not present in the catalog, preserving order and removing
/// duplicates. Stale entries from an older catalog version are not an error.
pub fn filter_to_catalog(values: &[String], catalog: &[String]) -> Vec<String> {
    let catalog: HashSet<&str> = catalog.iter().map(String::as_str).collect();
    values
        .iter()
        .filter(|value| catalog.contains(value.as_str()))
        .unique()
        .cloned()
        .collect()
}

/// Order-insensitive equality, so a hidden-first concatenation that only
/// reorders the list is not treated as a change.
pub fn same_set(a: &[String], b: &[String]) -> bool {
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();
    a == b
}

/// Merge a scope-limited edit back into the full persisted country list.
///
/// The user only sees and edits the visible catalog, so everything persisted
/// outside it must survive untouched: a country marked visited in the World
/// scope is not lost by an edit made in the Europe scope. Returns the merged
/// list only when it differs from `persisted` as a set, so reordering alone
/// never triggers a write.
pub fn reconcile_countries(
    persisted: &[String],
    visible: &[String],
    edit: &[String],
) -> Option<Vec<String>> {
    let visible: HashSet<&str> = visible.iter().map(String::as_str).collect();
    let merged: Vec<String> = persisted
        .iter()
        .filter(|region| !visible.contains(region.as_str()))
        .chain(edit.iter())
        .unique()
        .cloned()
        .collect();

    match same_set(&merged, persisted) {
        true => None,
        false => Some(merged),
    }
}

/// States have a single scope, so the edit replaces the persisted list
/// directly, filtered to valid postal codes.
pub fn reconcile_states(edit: &[String]) -> Vec<String> {
    edit.iter()
        .filter(|code| is_state(code))
        .unique()
        .cloned()
        .collect()
}
