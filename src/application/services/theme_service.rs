//! Per-user theme read and upsert.

use std::sync::Arc;

use crate::domain::entities::{Theme, ThemeSettings};
use crate::domain::repositories::ThemeRepository;
use crate::error::AppError;
use validator::Validate;

/// Service for theme storage. One theme per user; reads fall back to the
/// default settings for users who never saved one.
pub struct ThemeService<T: ThemeRepository> {
    repository: Arc<T>,
}

impl<T: ThemeRepository> ThemeService<T> {
    /// Creates a new theme service.
    pub fn new(repository: Arc<T>) -> Self {
        Self { repository }
    }

    /// Returns the user's saved settings, or the defaults.
    pub async fn get_settings(&self, user_id: i64) -> Result<ThemeSettings, AppError> {
        let theme = self.repository.find_by_user(user_id).await?;

        Ok(theme.map(|t| t.settings).unwrap_or_default())
    }

    /// Validates and saves the user's settings, replacing any existing
    /// theme.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the custom CSS exceeds its cap.
    pub async fn save(&self, user_id: i64, settings: ThemeSettings) -> Result<Theme, AppError> {
        settings.validate()?;

        self.repository.upsert(user_id, settings).await
    }
}
