//! Open Library API client with optional retry logic.

use super::types::*;
use crate::source::CatalogSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::config::CatalogConfig;
use shared::{AuthorInfo, ListEntry, RatingSummary, WorkDetail};
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Failure of a single catalog request
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned status {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("failed to parse response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Open Library client
pub struct OpenLibraryClient {
    /// HTTP client
    client: Client,
    /// Base URL, without trailing slash
    base_url: String,
    /// Owner of the reading list
    username: String,
    /// Reading-log shelf
    shelf: String,
    /// Maximum retries for failed requests
    max_retries: u32,
    /// Base delay for retry (exponential backoff)
    retry_delay_ms: u64,
}

impl OpenLibraryClient {
    /// Create a new client from the catalog configuration
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self::with_http_client(client, config))
    }

    /// Create a client around an already configured HTTP client
    pub fn with_http_client(client: Client, config: &CatalogConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            shelf: config.shelf.clone(),
            max_retries: config.max_retries,
            retry_delay_ms: config.retry_delay_ms,
        }
    }

    /// Full URL for an endpoint path
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Path of the configured reading-list shelf
    pub fn reading_list_path(&self) -> String {
        format!("/people/{}/books/{}.json", self.username, self.shelf)
    }

    /// Make a GET request, retrying transport and status failures
    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = self.endpoint_url(path);
        let mut attempt = 0;

        loop {
            debug!(url = %url, attempt = attempt + 1, "Making API request");

            let error = match self.client.get(&url).query(query).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return match response.json::<T>().await {
                            Ok(data) => {
                                debug!(url = %url, "Request successful");
                                Ok(data)
                            }
                            Err(e) => {
                                warn!(url = %url, error = %e, "Failed to parse response");
                                Err(FetchError::Decode { url, source: e })
                            }
                        };
                    }

                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());

                    warn!(url = %url, status = %status, error = %body, "Request failed");
                    FetchError::Status {
                        url: url.clone(),
                        status,
                        body,
                    }
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "Request error");
                    FetchError::Transport {
                        url: url.clone(),
                        source: e,
                    }
                }
            };

            if attempt >= self.max_retries {
                return Err(error);
            }

            let delay = Duration::from_millis(backoff_delay_ms(self.retry_delay_ms, attempt));
            debug!(delay_ms = delay.as_millis(), "Retrying after delay");
            sleep(delay).await;
            attempt += 1;
        }
    }
}

/// Exponential backoff, saturating instead of overflowing on long retry runs
fn backoff_delay_ms(base_ms: u64, attempt: u32) -> u64 {
    base_ms.saturating_mul(2u64.saturating_pow(attempt))
}

#[async_trait]
impl CatalogSource for OpenLibraryClient {
    async fn reading_list(&self) -> Result<Vec<ListEntry>> {
        info!(username = %self.username, shelf = %self.shelf, "Fetching reading list");
        let response: ReadingLogResponse = self.get(&self.reading_list_path(), &[]).await?;
        Ok(response
            .reading_log_entries
            .into_iter()
            .map(ListEntry::from)
            .collect())
    }

    async fn ratings(&self, work_key: &str) -> Result<RatingSummary> {
        let response: RatingsResponse = self
            .get(&format!("{}/ratings.json", work_key), &[])
            .await?;
        Ok(response.into())
    }

    async fn work(&self, work_key: &str) -> Result<WorkDetail> {
        let response: WorkResponse = self.get(&format!("{}.json", work_key), &[]).await?;
        Ok(response.into())
    }

    async fn search_author(&self, name: &str) -> Result<AuthorInfo> {
        let response: AuthorSearchResponse = self
            .get("/search/authors.json", &[("q", name)])
            .await?;
        Ok(response.into())
    }
}
