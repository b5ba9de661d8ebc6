//! Repository trait for product data access.

use crate::domain::entities::{NewProduct, Product, ProductPatch};
use crate::domain::listing::ListQuery;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing products. Mirrors
/// [`super::LinkRepository`] with pricing fields on top.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Creates a new product, reserving its short code in the same
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already reserved
    /// (by any link or product). Returns [`AppError::Internal`] on database
    /// errors.
    async fn create(&self, new_product: NewProduct) -> Result<Product, AppError>;

    /// Finds a product owned by `user_id` by its id.
    async fn find_by_id(&self, id: i64, user_id: i64) -> Result<Option<Product>, AppError>;

    /// Finds a product by its short code, regardless of owner.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<Product>, AppError>;

    /// Lists a user's products with pagination and sorting.
    async fn list(&self, user_id: i64, query: ListQuery) -> Result<Vec<Product>, AppError>;

    /// Counts a user's products.
    async fn count(&self, user_id: i64) -> Result<i64, AppError>;

    /// Partially updates a product. The short code is immutable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no product matches `id` + `user_id`.
    async fn update(&self, id: i64, user_id: i64, patch: ProductPatch)
    -> Result<Product, AppError>;

    /// Deletes a product and frees its short code reservation.
    ///
    /// Returns `Ok(true)` if the product existed, `Ok(false)` otherwise.
    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError>;

    /// Increments the click counter.
    async fn increment_clicks(&self, id: i64) -> Result<(), AppError>;
}
