//! Enrichment joiner.
//!
//! Expands each reading-list entry into an [`EnrichedRecord`] by issuing the
//! ratings, work-detail and author-search lookups concurrently and projecting
//! the three results. All entries are enriched concurrently on the calling
//! task; output order always matches input order because every record's
//! position is fixed when its future is created.

use crate::source::CatalogSource;
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use shared::config::EnrichmentConfig;
use shared::{AuthorInfo, EnrichedRecord, JoinPolicy, ListEntry};
use tracing::{debug, error, info, warn};

/// Enrichment options
#[derive(Debug, Clone, Copy, Default)]
pub struct EnrichOptions {
    /// What a failing entry does to the batch
    pub join_policy: JoinPolicy,
    /// Maximum entries in flight (None = all entries at once)
    pub max_concurrent_entries: Option<usize>,
}

impl From<&EnrichmentConfig> for EnrichOptions {
    fn from(config: &EnrichmentConfig) -> Self {
        Self {
            join_policy: config.join_policy,
            max_concurrent_entries: config.max_concurrent_entries,
        }
    }
}

impl EnrichOptions {
    fn limit(&self, entries: usize) -> usize {
        self.max_concurrent_entries.unwrap_or(entries).clamp(1, entries.max(1))
    }
}

/// Enrich every entry of the reading list
///
/// With [`JoinPolicy::Strict`] the first failing entry aborts the batch and
/// its error is returned. With [`JoinPolicy::Partial`] a failing entry is
/// replaced by [`EnrichedRecord::placeholder`] and the batch always succeeds.
pub async fn enrich<S: CatalogSource + ?Sized>(
    source: &S,
    entries: &[ListEntry],
    options: EnrichOptions,
) -> Result<Vec<EnrichedRecord>> {
    if entries.is_empty() {
        debug!("Reading list is empty, nothing to enrich");
        return Ok(Vec::new());
    }

    let limit = options.limit(entries.len());
    info!(
        entries = entries.len(),
        policy = %options.join_policy,
        max_concurrent = limit,
        "Enriching reading list"
    );

    let records = match options.join_policy {
        JoinPolicy::Strict => {
            let result = stream::iter(
                entries
                    .iter()
                    .enumerate()
                    .map(|(position, entry)| enrich_entry(source, position, entry)),
            )
            .buffered(limit)
            .try_collect::<Vec<_>>()
            .await;

            match result {
                Ok(records) => records,
                Err(e) => {
                    error!(error = %e, "Error fetching data");
                    return Err(e);
                }
            }
        }
        JoinPolicy::Partial => {
            stream::iter(entries.iter().enumerate().map(|(position, entry)| async move {
                match enrich_entry(source, position, entry).await {
                    Ok(record) => record,
                    Err(e) => {
                        warn!(
                            work_key = %entry.work_key,
                            error = %e,
                            "Enrichment failed, using placeholder record"
                        );
                        EnrichedRecord::placeholder(position, entry)
                    }
                }
            }))
            .buffered(limit)
            .collect::<Vec<_>>()
            .await
        }
    };

    info!(records = records.len(), "Enrichment complete");
    Ok(records)
}

/// Enrich one entry; succeeds only if all three lookups succeed
async fn enrich_entry<S: CatalogSource + ?Sized>(
    source: &S,
    position: usize,
    entry: &ListEntry,
) -> Result<EnrichedRecord> {
    let author_name = entry.author_name();

    let (rating, work, author) = tokio::try_join!(
        source.ratings(&entry.work_key),
        source.work(&entry.work_key),
        async {
            // No author on the list entry: nothing to search for
            if author_name.is_empty() {
                Ok(AuthorInfo::default())
            } else {
                source.search_author(author_name).await
            }
        },
    )
    .with_context(|| format!("Failed to enrich {}", entry.work_key))?;

    Ok(EnrichedRecord::project(
        position, entry, &rating, &work, &author,
    ))
}
