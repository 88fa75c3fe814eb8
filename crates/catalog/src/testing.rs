//! In-memory catalog used by the unit tests.

use crate::source::CatalogSource;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{AuthorInfo, ListEntry, RatingSummary, WorkDetail};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct FakeCatalog {
    pub entries: Option<Vec<ListEntry>>,
    pub ratings: HashMap<String, RatingSummary>,
    pub works: HashMap<String, WorkDetail>,
    pub authors: HashMap<String, AuthorInfo>,
    pub failing_works: HashSet<String>,
    pub delays_ms: HashMap<String, u64>,
    pub calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

pub fn entry(n: usize, author: &str) -> ListEntry {
    ListEntry {
        work_key: format!("/works/OL{}W", n),
        title: format!("Book {}", n),
        first_publish_year: Some(1900 + n as i32),
        author_names: vec![author.to_string()],
    }
}

impl FakeCatalog {
    pub fn with_entries(entries: Vec<ListEntry>) -> Self {
        Self {
            entries: Some(entries),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn track(&self, key: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let delay = self.delays_ms.get(key).copied().unwrap_or(1);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn reading_list(&self) -> Result<Vec<ListEntry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entries
            .clone()
            .ok_or_else(|| anyhow!("connection refused"))
    }

    async fn ratings(&self, work_key: &str) -> Result<RatingSummary> {
        self.track(work_key).await;
        Ok(self.ratings.get(work_key).copied().unwrap_or_default())
    }

    async fn work(&self, work_key: &str) -> Result<WorkDetail> {
        self.track(work_key).await;
        if self.failing_works.contains(work_key) {
            return Err(anyhow!("work lookup failed for {}", work_key));
        }
        Ok(self.works.get(work_key).cloned().unwrap_or_default())
    }

    async fn search_author(&self, name: &str) -> Result<AuthorInfo> {
        self.track(name).await;
        Ok(self.authors.get(name).cloned().unwrap_or_default())
    }
}
