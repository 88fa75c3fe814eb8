//! Catalog library for the reading-list dashboard.
//!
//! Fetches a reading list from Open Library and enriches every entry with
//! rating, subject and author metadata.

pub mod api;
pub mod enrichment;
pub mod reading_list;
pub mod source;

pub use api::{FetchError, OpenLibraryClient};
pub use enrichment::{enrich, EnrichOptions};
pub use reading_list::fetch_reading_list;
pub use source::CatalogSource;

#[cfg(test)]
pub(crate) mod testing;
