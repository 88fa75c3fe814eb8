//! Reading-list fetcher.

use crate::source::CatalogSource;
use shared::ListEntry;
use tracing::{error, info};

/// Fetch the configured reading list
///
/// Any failure is logged and yields an empty list; the caller treats that
/// the same as a shelf with no books.
pub async fn fetch_reading_list<S: CatalogSource + ?Sized>(source: &S) -> Vec<ListEntry> {
    match source.reading_list().await {
        Ok(entries) => {
            info!(entries = entries.len(), "Fetched reading list");
            entries
        }
        Err(e) => {
            error!(error = %e, "Error fetching reading list");
            Vec::new()
        }
    }
}
