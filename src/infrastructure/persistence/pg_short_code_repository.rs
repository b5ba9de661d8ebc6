//! PostgreSQL implementation of the short code existence check.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::ShortCodeRepository;
use crate::error::AppError;

/// Existence checks against the shared `short_codes` reservation table.
pub struct PgShortCodeRepository {
    pool: Arc<PgPool>,
}

impl PgShortCodeRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortCodeRepository for PgShortCodeRepository {
    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM short_codes WHERE code = $1)")
                .bind(code)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }
}
