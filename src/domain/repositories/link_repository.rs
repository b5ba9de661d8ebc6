//! Repository trait for profile link data access.

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::listing::ListQuery;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing profile links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new link, reserving its short code in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already reserved
    /// (by any link or product). Returns [`AppError::Internal`] on database
    /// errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link owned by `user_id` by its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64, user_id: i64) -> Result<Option<Link>, AppError>;

    /// Finds a link by its short code, regardless of owner.
    ///
    /// Used by the public redirect endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError>;

    /// Lists a user's links with pagination and sorting.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, user_id: i64, query: ListQuery) -> Result<Vec<Link>, AppError>;

    /// Counts a user's links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, user_id: i64) -> Result<i64, AppError>;

    /// Partially updates a link. Only fields present in [`LinkPatch`] are
    /// modified; the short code is immutable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `id` + `user_id`.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, user_id: i64, patch: LinkPatch) -> Result<Link, AppError>;

    /// Deletes a link and frees its short code reservation.
    ///
    /// Returns `Ok(true)` if the link existed, `Ok(false)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError>;

    /// Increments the click counter. Fired by the background click worker,
    /// never from a request path.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_clicks(&self, id: i64) -> Result<(), AppError>;
}
