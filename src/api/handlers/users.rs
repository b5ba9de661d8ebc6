//! Handlers for the authenticated user's profile.

use axum::{Extension, Json, extract::State};
use validator::Validate;

use crate::api::dto::users::{UpdateUserRequest, UserResponse};
use crate::application::services::AccessClaims;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the authenticated user's profile.
///
/// # Endpoint
///
/// `GET /api/users/me`
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.get_profile(claims.sub).await?;

    Ok(Json(UserResponse::from(user)))
}

/// Partially updates the authenticated user's profile.
///
/// # Endpoint
///
/// `PATCH /api/users/me`
///
/// # Errors
///
/// Returns 400 on validation failure and 409 when a new email is taken.
pub async fn update_me_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .update_profile(claims.sub, payload.into())
        .await?;

    Ok(Json(UserResponse::from(user)))
}
