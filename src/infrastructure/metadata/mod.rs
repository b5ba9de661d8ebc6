//! Page metadata enrichment for links and products.
//!
//! Fetches a target page and extracts display metadata (title, description,
//! image, pricing) from its markup via ordered fallback lookups. The
//! contract is "always produce something displayable": any network or parse
//! failure degrades to a hostname-derived placeholder, never an error.

mod extract;
mod fetcher;
mod oembed;

pub use extract::{extract, fallback_metadata};
pub use fetcher::{HttpMetadataFetcher, MetadataProvider};
pub use oembed::youtube_video_id;

#[cfg(test)]
pub use fetcher::MockMetadataProvider;

use serde::{Deserialize, Serialize};

/// Derived, non-authoritative page metadata.
///
/// Copied into a link/product at creation or refresh time; stale once the
/// source page changes (nothing invalidates it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub image: String,
    /// Digits and punctuation only; empty when the page carries no price.
    pub price: String,
    pub currency: String,
    pub site_name: String,
    /// `website`, `product`, or `video`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl Default for PageMetadata {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            image: String::new(),
            price: String::new(),
            currency: "USD".to_string(),
            site_name: String::new(),
            kind: "website".to_string(),
        }
    }
}
