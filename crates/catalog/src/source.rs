//! Abstraction over where catalog data comes from.

use anyhow::Result;
use async_trait::async_trait;
use shared::{AuthorInfo, ListEntry, RatingSummary, WorkDetail};

/// Read access to the book catalog
///
/// Implemented by [`crate::OpenLibraryClient`] for the live API; tests
/// substitute in-memory catalogs.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Entries of the configured reading list, in list order
    async fn reading_list(&self) -> Result<Vec<ListEntry>>;

    /// Rating summary for a work key such as `/works/OL45804W`
    async fn ratings(&self, work_key: &str) -> Result<RatingSummary>;

    /// Work detail for a work key
    async fn work(&self, work_key: &str) -> Result<WorkDetail>;

    /// Best author search hit for a name
    async fn search_author(&self, name: &str) -> Result<AuthorInfo>;
}
