//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::listing::ListQuery;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;

/// PostgreSQL repository for link storage and retrieval.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        // The code reservation and the link row commit together; a racing
        // allocation of the same candidate loses on the reservation PK.
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO short_codes (code, owner_kind) VALUES ($1, 'link')")
            .bind(&new_link.short_code)
            .execute(&mut *tx)
            .await?;

        let link = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (user_id, short_code, url, title, description, image, site_name, position)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(new_link.user_id)
        .bind(&new_link.short_code)
        .bind(&new_link.url)
        .bind(&new_link.title)
        .bind(&new_link.description)
        .bind(&new_link.image)
        .bind(&new_link.site_name)
        .bind(new_link.position)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(link)
    }

    async fn find_by_id(&self, id: i64, user_id: i64) -> Result<Option<Link>, AppError> {
        let link =
            sqlx::query_as::<_, Link>("SELECT * FROM links WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(link)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>("SELECT * FROM links WHERE short_code = $1")
            .bind(short_code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(link)
    }

    async fn list(&self, user_id: i64, query: ListQuery) -> Result<Vec<Link>, AppError> {
        // ORDER BY cannot be a bind parameter; the fragment comes from
        // closed enums, never from request input.
        let sql = format!(
            "SELECT * FROM links WHERE user_id = $1 ORDER BY {} LIMIT $2 OFFSET $3",
            query.order_by()
        );

        let links = sqlx::query_as::<_, Link>(&sql)
            .bind(user_id)
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(links)
    }

    async fn count(&self, user_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update(&self, id: i64, user_id: i64, patch: LinkPatch) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            UPDATE links SET
                url         = COALESCE($3, url),
                title       = COALESCE($4, title),
                description = COALESCE($5, description),
                image       = COALESCE($6, image),
                site_name   = COALESCE($7, site_name),
                position    = COALESCE($8, position),
                active      = COALESCE($9, active),
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
        .bind(patch.position)
        .bind(patch.active)
        .fetch_optional(self.pool.as_ref())
        .await?;

        link.ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let code: Option<String> = sqlx::query_scalar(
            "DELETE FROM links WHERE id = $1 AND user_id = $2 RETURNING short_code",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let deleted = match code {
            Some(code) => {
                // Free the reservation so the code can be reissued.
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
        sqlx::query("UPDATE links SET click_count = click_count + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
