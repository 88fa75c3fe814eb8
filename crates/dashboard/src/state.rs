//! Dashboard state container.
//!
//! Owns the reading list, the canonical (merged) record set, the filtered
//! view and the table state. The view is always the canonical set or an
//! author-name subset of it.

use crate::export;
use crate::search::filter_by_author;
use crate::table::TableState;
use anyhow::Result;
use catalog::{enrich, fetch_reading_list, CatalogSource, EnrichOptions};
use shared::{EnrichedRecord, ListEntry};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// In-memory dashboard state
#[derive(Debug, Clone)]
pub struct Dashboard {
    entries: Vec<ListEntry>,
    merged: Vec<EnrichedRecord>,
    filtered: Vec<EnrichedRecord>,
    loading: bool,
    table: TableState,
}

impl Dashboard {
    /// Create an empty dashboard in the loading state
    pub fn new(table: TableState) -> Self {
        Self {
            entries: Vec::new(),
            merged: Vec::new(),
            filtered: Vec::new(),
            loading: true,
            table,
        }
    }

    /// Fetch the reading list and enrich it
    ///
    /// An empty or failed list fetch leaves an empty, loaded dashboard. A
    /// failed enrichment leaves the dashboard loading; the error has already
    /// been logged by the joiner.
    pub async fn load<S: CatalogSource + ?Sized>(&mut self, source: &S, options: EnrichOptions) {
        self.entries = fetch_reading_list(source).await;

        if self.entries.is_empty() {
            info!("Reading list is empty");
            self.set_records(Vec::new());
            return;
        }

        match enrich(source, &self.entries, options).await {
            Ok(records) => self.set_records(records),
            Err(e) => warn!(error = %e, "Dashboard stays in loading state"),
        }
    }

    /// Replace the canonical set; the view shows all of it
    pub fn set_records(&mut self, records: Vec<EnrichedRecord>) {
        self.filtered = records.clone();
        self.merged = records;
        self.loading = false;
        self.table.reset_page_index();
    }

    /// Narrow the view to authors matching `query`; returns the view size
    pub fn search(&mut self, query: &str) -> usize {
        self.filtered = filter_by_author(&self.merged, query);
        self.table.reset_page_index();
        info!(query = query.trim(), matches = self.filtered.len(), "Search applied");
        self.filtered.len()
    }

    /// Restore the unfiltered view
    pub fn reset(&mut self) {
        self.filtered = self.merged.clone();
        self.table.reset_page_index();
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn merged(&self) -> &[EnrichedRecord] {
        &self.merged
    }

    pub fn view(&self) -> &[EnrichedRecord] {
        &self.filtered
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TableState {
        &mut self.table
    }

    /// Render the current page of the view
    pub fn render(&self) -> String {
        self.table.render(&self.filtered, self.loading)
    }

    /// Export the whole view; a timestamped file in `export_dir` when no
    /// path is given
    pub fn export(&self, path: Option<&Path>, export_dir: &Path) -> Result<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => export::default_export_path(export_dir),
        };
        export::export_to_file(&self.filtered, path)
    }
}
