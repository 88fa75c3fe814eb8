//! Author-name search over the canonical record set.

use shared::EnrichedRecord;

/// Filter records by author name
///
/// The query is trimmed; an empty query returns the canonical set
/// unchanged. Otherwise records whose author name contains the query,
/// ignoring case, are kept in their original order.
pub fn filter_by_author(canonical: &[EnrichedRecord], query: &str) -> Vec<EnrichedRecord> {
    let query = query.trim();
    if query.is_empty() {
        return canonical.to_vec();
    }

    let needle = query.to_lowercase();
    canonical
        .iter()
        .filter(|record| record.author_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
