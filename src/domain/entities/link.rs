//! Link entity: one entry on a user's profile page.

use chrono::{DateTime, Utc};

/// A profile link with its short code and display metadata.
///
/// The metadata fields (`title`, `description`, `image`, `site_name`) are
/// copied from the target page at creation or refresh time. They are
/// cosmetic and can go stale; nothing invalidates them automatically.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub user_id: i64,
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

/// Input data for creating a new link.
///
/// `short_code` is already allocated (or validated, if user-supplied) by
/// the time this struct exists; the repository reserves it transactionally.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub user_id: i64,
    pub short_code: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub site_name: String,
    pub position: i32,
}

/// Partial update for an existing link. `None` fields are left unchanged.
///
/// The short code is immutable and deliberately absent here.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub site_name: Option<String>,
    pub position: Option<i32>,
    pub active: Option<bool>,
}
