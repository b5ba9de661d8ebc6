//! Repository trait for short code reservations.

use crate::error::AppError;
use async_trait::async_trait;

/// Existence check over the shared short-code reservation table.
///
/// This is the uniqueness predicate handed to
/// [`crate::utils::short_code::allocate`]. It is a point-in-time read: the
/// reservation table's primary key is what actually rejects a racing
/// duplicate at insert time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortCodeRepository: Send + Sync {
    /// Returns whether a code is already reserved by any link or product.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;
}
