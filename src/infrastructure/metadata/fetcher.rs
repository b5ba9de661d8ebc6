//! HTTP metadata fetcher.

use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use super::oembed::{self, OEmbedResponse, youtube_video_id};
use super::{PageMetadata, extract};

/// Fixed per-request timeout. No retries; metadata is cosmetic.
pub const FETCH_TIMEOUT_SECS: u64 = 10;

/// Some sites serve empty or bot-gated pages to unknown agents.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Source of page metadata.
///
/// Infallible by contract: implementations degrade to a placeholder rather
/// than surfacing fetch errors to callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn fetch(&self, url: &str) -> PageMetadata;
}

/// Fetches pages over HTTP and extracts metadata from their markup,
/// special-casing YouTube URLs via oEmbed.
pub struct HttpMetadataFetcher {
    client: reqwest::Client,
}

impl HttpMetadataFetcher {
    /// Builds the fetcher with its own connection pool, browser-like
    /// User-Agent, and fixed timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client })
    }

    async fn fetch_page(&self, url: &str) -> Result<(String, Url), reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let final_url = response.url().clone();
        let body = response.text().await?;

        Ok((body, final_url))
    }

    async fn fetch_oembed(&self, video_url: &str) -> Result<OEmbedResponse, reqwest::Error> {
        self.client
            .get(oembed::OEMBED_ENDPOINT)
            .query(&[("url", video_url), ("format", "json")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl MetadataProvider for HttpMetadataFetcher {
    /// Never fails. Resolution order:
    ///
    /// 1. Recognized YouTube URL → oEmbed; on any oEmbed failure the
    ///    generic path below runs instead (full delegation).
    /// 2. Generic fetch + markup extraction.
    /// 3. Hostname-derived placeholder on any fetch/parse error.
    async fn fetch(&self, url: &str) -> PageMetadata {
        if youtube_video_id(url).is_some() {
            match self.fetch_oembed(url).await {
                Ok(response) => {
                    metrics::counter!("metadata_fetches_total", "source" => "oembed")
                        .increment(1);
                    return oembed::map_oembed(response);
                }
                Err(e) => {
                    tracing::debug!(error = %e, url, "oEmbed lookup failed, using generic fetch");
                }
            }
        }

        match self.fetch_page(url).await {
            Ok((body, final_url)) => {
                metrics::counter!("metadata_fetches_total", "source" => "page").increment(1);
                extract(&body, &final_url)
            }
            Err(e) => {
                metrics::counter!("metadata_fetches_total", "source" => "fallback").increment(1);
                tracing::debug!(error = %e, url, "Metadata fetch failed, returning placeholder");
                super::fallback_metadata(url)
            }
        }
    }
}
