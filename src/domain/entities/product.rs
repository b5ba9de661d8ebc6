//! Product entity: a priced storefront entry on a user's profile page.

use chrono::{DateTime, Utc};

/// A product card. Same shape as [`super::Link`] plus pricing.
///
/// `price` keeps the text extracted from the source page (digits and
/// punctuation only); `currency` is a three-letter code.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub user_id: i64,
    pub short_code: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub site_name: String,
    pub price: String,
    pub currency: String,
    pub click_count: i64,
    pub position: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub user_id: i64,
    pub short_code: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub site_name: String,
    pub price: String,
    pub currency: String,
    pub position: i32,
}

/// Partial update for an existing product. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub site_name: Option<String>,
    pub price: Option<String>,
    pub currency: Option<String>,
    pub position: Option<i32>,
    pub active: Option<bool>,
}
