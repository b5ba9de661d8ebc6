//! DTOs for product endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::links::SHORT_CODE_REGEX;
use super::pagination::PageInfo;
use crate::application::services::{CreateProduct, UpdateProduct};
use crate::domain::entities::Product;

/// Request to create a product. Pricing left out is extracted from the
/// target page's metadata.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(url(message = "invalid URL"))]
    pub url: String,

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

    #[validate(length(max = 20, message = "price is capped at 20 characters"))]
    pub price: Option<String>,

    #[validate(length(equal = 3, message = "currency must be a 3-letter code"))]
    pub currency: Option<String>,

    pub position: Option<i32>,
}

impl From<CreateProductRequest> for CreateProduct {
    fn from(req: CreateProductRequest) -> Self {
        CreateProduct {
            url: req.url,
            short_code: req.short_code,
            title: req.title,
            description: req.description,
            image: req.image,
            price: req.price,
            currency: req.currency.map(|c| c.to_uppercase()),
            position: req.position,
        }
    }
}

/// Partial product update.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(url(message = "invalid URL"))]
    pub url: Option<String>,

    #[validate(length(max = 200, message = "title is capped at 200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 1000, message = "description is capped at 1000 characters"))]
    pub description: Option<String>,

    pub image: Option<String>,

    #[validate(length(max = 20, message = "price is capped at 20 characters"))]
    pub price: Option<String>,

    #[validate(length(equal = 3, message = "currency must be a 3-letter code"))]
    pub currency: Option<String>,

    pub position: Option<i32>,

    pub active: Option<bool>,

    #[serde(default)]
    pub refresh_metadata: bool,
}

impl From<UpdateProductRequest> for UpdateProduct {
    fn from(req: UpdateProductRequest) -> Self {
        UpdateProduct {
            url: req.url,
            title: req.title,
            description: req.description,
            image: req.image,
            price: req.price,
            currency: req.currency.map(|c| c.to_uppercase()),
            position: req.position,
            active: req.active,
            refresh_metadata: req.refresh_metadata,
        }
    }
}

/// JSON representation of a product.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
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

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            short_code: product.short_code,
            url: product.url,
            title: product.title,
            description: product.description,
            image: product.image,
            site_name: product.site_name,
            price: product.price,
            currency: product.currency,
            click_count: product.click_count,
            position: product.position,
            active: product.active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Paginated list of products.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub pagination: PageInfo,
    pub items: Vec<ProductResponse>,
}
