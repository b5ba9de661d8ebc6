//! PostgreSQL implementation of product repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewProduct, Product, ProductPatch};
use crate::domain::listing::ListQuery;
use crate::domain::repositories::ProductRepository;
use crate::error::AppError;
use serde_json::json;

/// PostgreSQL repository for product storage and retrieval.
pub struct PgProductRepository {
    pool: Arc<PgPool>,
}

impl PgProductRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, new_product: NewProduct) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO short_codes (code, owner_kind) VALUES ($1, 'product')")
            .bind(&new_product.short_code)
            .execute(&mut *tx)
            .await?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (user_id, short_code, url, title, description, image, site_name, price, currency, position)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(new_product.user_id)
        .bind(&new_product.short_code)
        .bind(&new_product.url)
        .bind(&new_product.title)
        .bind(&new_product.description)
        .bind(&new_product.image)
        .bind(&new_product.site_name)
        .bind(&new_product.price)
        .bind(&new_product.currency)
        .bind(new_product.position)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn find_by_id(&self, id: i64, user_id: i64) -> Result<Option<Product>, AppError> {
        let product =
            sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(product)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE short_code = $1")
            .bind(short_code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(product)
    }

    async fn list(&self, user_id: i64, query: ListQuery) -> Result<Vec<Product>, AppError> {
        let sql = format!(
            "SELECT * FROM products WHERE user_id = $1 ORDER BY {} LIMIT $2 OFFSET $3",
            query.order_by()
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(user_id)
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(products)
    }

    async fn count(&self, user_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update(
        &self,
        id: i64,
        user_id: i64,
        patch: ProductPatch,
    ) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                url         = COALESCE($3, url),
                title       = COALESCE($4, title),
                description = COALESCE($5, description),
                image       = COALESCE($6, image),
                site_name   = COALESCE($7, site_name),
                price       = COALESCE($8, price),
                currency    = COALESCE($9, currency),
                position    = COALESCE($10, position),
                active      = COALESCE($11, active),
                updated_at  = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(patch.url)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.image)
        .bind(patch.site_name)
        .bind(patch.price)
        .bind(patch.currency)
        .bind(patch.position)
        .bind(patch.active)
        .fetch_optional(self.pool.as_ref())
        .await?;

        product.ok_or_else(|| AppError::not_found("Product not found", json!({ "id": id })))
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let code: Option<String> = sqlx::query_scalar(
            "DELETE FROM products WHERE id = $1 AND user_id = $2 RETURNING short_code",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let deleted = match code {
            Some(code) => {
                sqlx::query("DELETE FROM short_codes WHERE code = $1")
                    .bind(&code)
                    .execute(&mut *tx)
                    .await?;
                true
            }
            None => false,
        };

        tx.commit().await?;

        Ok(deleted)
    }

    async fn increment_clicks(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE products SET click_count = click_count + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
