//! YouTube oEmbed support.
//!
//! Known video URLs skip markup scraping entirely: the video id is pulled
//! out with a fixed regex and the public oEmbed endpoint supplies
//! structured metadata. Any failure on this path delegates to the generic
//! fetch, it is not a failure mode of its own.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use url::Url;

use super::PageMetadata;

/// Matches the 11-character video id in the URL forms YouTube serves:
/// `watch?v=`, `youtu.be/`, `embed/`, and `shorts/`.
static YOUTUBE_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/(?:watch\?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{11})")
        .unwrap()
});

/// Endpoint queried with `?url=<video url>&format=json`.
pub const OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";

/// Extracts the YouTube video id, if the URL is a recognized video URL.
pub fn youtube_video_id(url: &str) -> Option<&str> {
    YOUTUBE_ID_REGEX
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Subset of the oEmbed response this service consumes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OEmbedResponse {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub author_url: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub provider_name: String,
}

/// Maps an oEmbed response into the common metadata shape.
///
/// `site_name` is the video author's host; type is always `video`.
pub fn map_oembed(response: OEmbedResponse) -> PageMetadata {
    let site_name = Url::parse(&response.author_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or(response.provider_name);

    PageMetadata {
        title: response.title,
        description: response.author_name,
        image: response.thumbnail_url,
        site_name,
        kind: "video".to_string(),
        ..PageMetadata::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_id_from_watch_url() {
        assert_eq!(
            youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_video_id_from_short_url() {
        assert_eq!(
            youtube_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_video_id_from_embed_and_shorts() {
        assert_eq!(
            youtube_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            youtube_video_id("https://youtube.com/shorts/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_video_id_with_extra_query_params() {
        assert_eq!(
            youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_non_video_urls_do_not_match() {
        assert_eq!(youtube_video_id("https://example.com/watch?v=notit"), None);
        assert_eq!(youtube_video_id("https://www.youtube.com/feed/library"), None);
    }

    #[test]
    fn test_map_oembed_shape() {
        let meta = map_oembed(OEmbedResponse {
            title: "Never Gonna Give You Up".to_string(),
            author_name: "Rick Astley".to_string(),
            author_url: "https://www.youtube.com/@RickAstley".to_string(),
            thumbnail_url: "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg".to_string(),
            provider_name: "YouTube".to_string(),
        });

        assert_eq!(meta.title, "Never Gonna Give You Up");
        assert_eq!(meta.description, "Rick Astley");
        assert_eq!(meta.site_name, "www.youtube.com");
        assert_eq!(meta.kind, "video");
        assert!(meta.image.contains("hqdefault"));
    }

    #[test]
    fn test_map_oembed_falls_back_to_provider_name() {
        let meta = map_oembed(OEmbedResponse {
            title: "T".to_string(),
            provider_name: "YouTube".to_string(),
            ..OEmbedResponse::default()
        });

        assert_eq!(meta.site_name, "YouTube");
    }
}
