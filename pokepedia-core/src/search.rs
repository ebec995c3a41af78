//! Name search over the loaded catalog
//!
//! A stable, case-insensitive substring filter. It is a pure function of
//! (entries, query), cheap enough to recompute on every keystroke for a
//! catalog of a few hundred entries.

use crate::catalog::Entry;

/// True when `query` narrows the catalog at all
///
/// Blank and whitespace-only queries mean "no filter".
pub fn is_active(query: &str) -> bool {
    !query.trim().is_empty()
}

/// Entries whose name contains `query`, ignoring case, in catalog order
///
/// An inactive query returns every entry unchanged. The query itself is
/// matched as typed; trimming only decides whether a filter applies.
pub fn filter<'a>(entries: &'a [Entry], query: &str) -> Vec<&'a Entry> {
    if !is_active(query) {
        return entries.iter().collect();
    }

    let query_lower = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.name.to_lowercase().contains(&query_lower))
        .collect()
}

/// Owned variant of [`filter`] for callers that keep the result set
pub fn filter_owned(entries: &[Entry], query: &str) -> Vec<Entry> {
    filter(entries, query).into_iter().cloned().collect()
}
