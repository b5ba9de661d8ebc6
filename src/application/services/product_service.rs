//! Product creation, listing, and maintenance.
//!
//! Mirrors [`super::LinkService`]; products additionally carry a price and
//! currency, which are filled from page metadata when the caller omits
//! them.

use std::sync::Arc;

use crate::domain::entities::{NewProduct, Product, ProductPatch};
use crate::domain::listing::ListQuery;
use crate::domain::repositories::{ProductRepository, ShortCodeRepository};
use crate::error::AppError;
use crate::infrastructure::metadata::MetadataProvider;
use crate::utils::short_code::{
    AllocateError, DEFAULT_CODE_LENGTH, DEFAULT_MAX_ATTEMPTS, allocate, is_valid_short_code,
};
use serde_json::json;

/// Validated product-creation input.
#[derive(Debug, Clone, Default)]
pub struct CreateProduct {
    pub url: String,
    pub short_code: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<String>,
    pub currency: Option<String>,
    pub position: Option<i32>,
}

/// Partial product update.
#[derive(Debug, Clone, Default)]
pub struct UpdateProduct {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<String>,
    pub currency: Option<String>,
    pub position: Option<i32>,
    pub active: Option<bool>,
    pub refresh_metadata: bool,
}

/// Service for managing products.
pub struct ProductService<P, C, M>
where
    P: ProductRepository,
    C: ShortCodeRepository,
    M: MetadataProvider,
{
    product_repository: Arc<P>,
    code_repository: Arc<C>,
    metadata: Arc<M>,
}

impl<P, C, M> ProductService<P, C, M>
where
    P: ProductRepository,
    C: ShortCodeRepository,
    M: MetadataProvider,
{
    /// Creates a new product service.
    pub fn new(product_repository: Arc<P>, code_repository: Arc<C>, metadata: Arc<M>) -> Self {
        Self {
            product_repository,
            code_repository,
            metadata,
        }
    }

    /// Creates a product for a user. Same code-allocation rules as links;
    /// the shared keyspace means a code held by a link is taken for
    /// products too.
    pub async fn create(&self, user_id: i64, input: CreateProduct) -> Result<Product, AppError> {
        let short_code = self.resolve_code(input.short_code).await?;

        let needs_metadata = input.title.is_none()
            || input.description.is_none()
            || input.image.is_none()
            || input.price.is_none();

        let meta = if needs_metadata {
            self.metadata.fetch(&input.url).await
        } else {
            Default::default()
        };

        let new_product = NewProduct {
            user_id,
            short_code,
            url: input.url,
            title: input.title.unwrap_or(meta.title),
            description: input.description.unwrap_or(meta.description),
            image: input.image.unwrap_or(meta.image),
            site_name: meta.site_name,
            price: input.price.unwrap_or(meta.price),
            currency: input.currency.unwrap_or(meta.currency),
            position: input.position.unwrap_or(0),
        };

        self.product_repository.create(new_product).await
    }

    /// Retrieves one of the user's products.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no product matches.
    pub async fn get(&self, id: i64, user_id: i64) -> Result<Product, AppError> {
        self.product_repository
            .find_by_id(id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found", json!({ "id": id })))
    }

    /// Lists the user's products plus the total count for pagination.
    pub async fn list(
        &self,
        user_id: i64,
        query: ListQuery,
    ) -> Result<(Vec<Product>, i64), AppError> {
        let products = self.product_repository.list(user_id, query).await?;
        let total = self.product_repository.count(user_id).await?;

        Ok((products, total))
    }

    /// Applies a partial update, optionally refreshing metadata from the
    /// target page.
    pub async fn update(
        &self,
        id: i64,
        user_id: i64,
        input: UpdateProduct,
    ) -> Result<Product, AppError> {
        let mut patch = ProductPatch {
            url: input.url,
            title: input.title,
            description: input.description,
            image: input.image,
            site_name: None,
            price: input.price,
            currency: input.currency,
            position: input.position,
            active: input.active,
        };

        if input.refresh_metadata {
            let target = match &patch.url {
                Some(url) => url.clone(),
                None => self.get(id, user_id).await?.url,
            };

            let meta = self.metadata.fetch(&target).await;
            patch.title.get_or_insert(meta.title);
            patch.description.get_or_insert(meta.description);
            patch.image.get_or_insert(meta.image);
            patch.price.get_or_insert(meta.price);
            patch.currency.get_or_insert(meta.currency);
            patch.site_name = Some(meta.site_name);
        }

        self.product_repository.update(id, user_id, patch).await
    }

    /// Deletes a product, freeing its short code. Returns the code for
    /// cache invalidation.
    pub async fn delete(&self, id: i64, user_id: i64) -> Result<String, AppError> {
        let product = self.get(id, user_id).await?;

        let deleted = self.product_repository.delete(id, user_id).await?;
        if !deleted {
            return Err(AppError::not_found("Product not found", json!({ "id": id })));
        }

        Ok(product.short_code)
    }

    /// Resolves a short code to its redirect target. Inactive products do
    /// not redirect.
    pub async fn resolve(&self, short_code: &str) -> Result<Option<Product>, AppError> {
        let product = self.product_repository.find_by_code(short_code).await?;

        Ok(product.filter(|p| p.active))
    }

    async fn resolve_code(&self, custom: Option<String>) -> Result<String, AppError> {
        if let Some(code) = custom {
            if !is_valid_short_code(&code) {
                return Err(AppError::bad_request(
                    "Short code must be 4-20 characters from [A-Za-z0-9_-]",
                    json!({ "short_code": code }),
                ));
            }

            if self.code_repository.exists(&code).await? {
                return Err(AppError::conflict(
                    "Short code already taken",
                    json!({ "short_code": code }),
                ));
            }

            return Ok(code);
        }

        allocate(DEFAULT_CODE_LENGTH, DEFAULT_MAX_ATTEMPTS, |candidate| async move {
            self.code_repository.exists(&candidate).await
        })
        .await
        .map_err(|e| match e {
            AllocateError::Exhausted { attempts } => AppError::internal(
                "Failed to allocate a unique short code",
                json!({ "reason": "exhausted", "attempts": attempts }),
            ),
            AllocateError::Check(reason) => AppError::internal(
                "Short code uniqueness check failed",
                json!({ "reason": reason }),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockProductRepository, MockShortCodeRepository};
    use crate::infrastructure::metadata::{MockMetadataProvider, PageMetadata};
    use chrono::Utc;

    fn stored_product(id: i64, code: &str) -> Product {
        Product {
            id,
            user_id: 1,
            short_code: code.to_string(),
            url: "https://shop.example.com/item".to_string(),
            title: String::new(),
            description: String::new(),
            image: String::new(),
            site_name: String::new(),
            price: String::new(),
            currency: "USD".to_string(),
            click_count: 0,
            position: 0,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_fills_price_from_metadata() {
        let mut product_repo = MockProductRepository::new();
        let mut code_repo = MockShortCodeRepository::new();
        let mut metadata = MockMetadataProvider::new();

        code_repo.expect_exists().times(1).returning(|_| Ok(false));

        metadata.expect_fetch().times(1).returning(|_| PageMetadata {
            title: "Gadget".to_string(),
            price: "19.99".to_string(),
            currency: "EUR".to_string(),
            kind: "product".to_string(),
            ..PageMetadata::default()
        });

        product_repo
            .expect_create()
            .withf(|p: &NewProduct| p.price == "19.99" && p.currency == "EUR")
            .times(1)
            .returning(|p| Ok(stored_product(20, &p.short_code)));

        let service = ProductService::new(
            Arc::new(product_repo),
            Arc::new(code_repo),
            Arc::new(metadata),
        );

        service
            .create(
                1,
                CreateProduct {
                    url: "https://shop.example.com/item".to_string(),
                    ..CreateProduct::default()
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_caller_price_wins_over_metadata() {
        let mut product_repo = MockProductRepository::new();
        let mut code_repo = MockShortCodeRepository::new();
        let mut metadata = MockMetadataProvider::new();

        code_repo.expect_exists().times(1).returning(|_| Ok(false));

        // Fetch still happens (title/description/image missing), but the
        // supplied price is kept.
        metadata.expect_fetch().times(1).returning(|_| PageMetadata {
            price: "99.99".to_string(),
            ..PageMetadata::default()
        });

        product_repo
            .expect_create()
            .withf(|p: &NewProduct| p.price == "5.00")
            .times(1)
            .returning(|p| Ok(stored_product(21, &p.short_code)));

        let service = ProductService::new(
            Arc::new(product_repo),
            Arc::new(code_repo),
            Arc::new(metadata),
        );

        service
            .create(
                1,
                CreateProduct {
                    url: "https://shop.example.com/item".to_string(),
                    price: Some("5.00".to_string()),
                    ..CreateProduct::default()
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_shared_keyspace_conflict() {
        let product_repo = MockProductRepository::new();
        let mut code_repo = MockShortCodeRepository::new();

        // Code held by a link: still taken for products.
        code_repo.expect_exists().times(1).returning(|_| Ok(true));

        let mut metadata = MockMetadataProvider::new();
        metadata.expect_fetch().times(0);

        let service = ProductService::new(
            Arc::new(product_repo),
            Arc::new(code_repo),
            Arc::new(metadata),
        );

        let result = service
            .create(
                1,
                CreateProduct {
                    url: "https://shop.example.com/item".to_string(),
                    short_code: Some("held1234".to_string()),
                    ..CreateProduct::default()
                },
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }
}
