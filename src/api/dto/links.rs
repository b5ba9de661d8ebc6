//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use super::pagination::PageInfo;
use crate::application::services::{CreateLink, UpdateLink};
use crate::domain::entities::Link;

/// Compiled regex for user-supplied short codes.
pub(crate) static SHORT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{4,20}$").unwrap());

/// Request to create a link.
///
/// Display fields left out are filled from the target page's metadata.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// The link destination (must be valid HTTP/HTTPS).
    #[validate(url(message = "invalid URL"))]
    pub url: String,

    /// Optional custom short code; allocated randomly when absent.
    #[validate(regex(
        path = "*SHORT_CODE_REGEX",
        message = "short code must be 4-20 characters from [A-Za-z0-9_-]"
    ))]
    pub short_code: Option<String>,

    #[validate(length(max = 200, message = "title is capped at 200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 1000, message = "description is capped at 1000 characters"))]
    pub description: Option<String>,

    pub image: Option<String>,

    pub position: Option<i32>,
}

impl From<CreateLinkRequest> for CreateLink {
    fn from(req: CreateLinkRequest) -> Self {
        CreateLink {
            url: req.url,
            short_code: req.short_code,
            title: req.title,
            description: req.description,
            image: req.image,
            position: req.position,
        }
    }
}

/// Partial link update. The short code is immutable and not accepted here.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    #[validate(url(message = "invalid URL"))]
    pub url: Option<String>,

    #[validate(length(max = 200, message = "title is capped at 200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 1000, message = "description is capped at 1000 characters"))]
    pub description: Option<String>,

    pub image: Option<String>,

    pub position: Option<i32>,

    pub active: Option<bool>,

    /// When true, display fields not set in this request are re-extracted
    /// from the target page.
    #[serde(default)]
    pub refresh_metadata: bool,
}

impl From<UpdateLinkRequest> for UpdateLink {
    fn from(req: UpdateLinkRequest) -> Self {
        UpdateLink {
            url: req.url,
            title: req.title,
            description: req.description,
            image: req.image,
            position: req.position,
            active: req.active,
            refresh_metadata: req.refresh_metadata,
        }
    }
}

/// JSON representation of a link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub short_code: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub site_name: String,
    pub click_count: i64,
    pub position: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            short_code: link.short_code,
            url: link.url,
            title: link.title,
            description: link.description,
            image: link.image,
            site_name: link.site_name,
            click_count: link.click_count,
            position: link.position,
            active: link.active,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

/// Paginated list of links.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub pagination: PageInfo,
    pub items: Vec<LinkResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let req = CreateLinkRequest {
            url: "https://example.com".to_string(),
            short_code: Some("my_code-1".to_string()),
            title: None,
            description: None,
            image: None,
            position: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_bad_code_and_url_together() {
        let req = CreateLinkRequest {
            url: "not-a-url".to_string(),
            short_code: Some("ab".to_string()),
            title: None,
            description: None,
            image: None,
            position: None,
        };

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("url"));
        assert!(fields.contains_key("short_code"));
    }

    #[test]
    fn test_update_request_defaults() {
        let req: UpdateLinkRequest = serde_json::from_str("{}").unwrap();
        assert!(!req.refresh_metadata);
        assert!(req.url.is_none());
    }
}
