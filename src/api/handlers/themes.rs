//! Handlers for the authenticated user's theme.

use axum::{Extension, Json, extract::State};

use crate::application::services::AccessClaims;
use crate::domain::entities::ThemeSettings;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the user's theme settings, or the defaults if none are saved.
///
/// # Endpoint
///
/// `GET /api/theme`
pub async fn get_theme_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
) -> Result<Json<ThemeSettings>, AppError> {
    let settings = state.theme_service.get_settings(claims.sub).await?;

    Ok(Json(settings))
}

/// Replaces the user's theme settings (upsert; one theme per user).
///
/// Absent fields take their defaults, so a partial body resets the rest.
///
/// # Endpoint
///
/// `PUT /api/theme`
///
/// # Errors
///
/// Returns 400 when an option value is outside its enumerated set (request
/// deserialization) or the custom CSS exceeds 5000 characters.
pub async fn put_theme_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
    Json(payload): Json<ThemeSettings>,
) -> Result<Json<ThemeSettings>, AppError> {
    let theme = state.theme_service.save(claims.sub, payload).await?;

    Ok(Json(theme.settings))
}
