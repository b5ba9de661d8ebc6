//! Repository trait for per-user theme storage.

use crate::domain::entities::{Theme, ThemeSettings};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for theme storage. One theme per user, enforced by
/// a unique constraint on `user_id`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThemeRepository: Send + Sync {
    /// Loads a user's theme, if they have saved one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_user(&self, user_id: i64) -> Result<Option<Theme>, AppError>;

    /// Creates or replaces a user's theme in one statement.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn upsert(&self, user_id: i64, settings: ThemeSettings) -> Result<Theme, AppError>;
}
