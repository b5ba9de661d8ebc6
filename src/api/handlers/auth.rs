//! Handlers for registration, login, and token refresh.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::auth::{
    AuthResponse, LoginRequest, RefreshRequest, RegisterRequest, TokenPairResponse,
};
use crate::application::services::Registration;
use crate::error::AppError;
use crate::state::AppState;

/// Creates an account and returns its first token pair.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Errors
///
/// Returns 400 with every failed field rule on validation failure, and
/// 409 when the username or email is already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    payload.validate()?;

    let (user, pair) = state
        .user_service
        .register(Registration {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            display_name: payload.display_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AuthResponse::new(user, pair))))
}

/// Authenticates with username-or-email and password.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Errors
///
/// Returns 401 for unknown identifier or wrong password; the two cases are
/// indistinguishable in the response.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let (user, pair) = state
        .user_service
        .login(&payload.identifier, &payload.password)
        .await?;

    Ok(Json(AuthResponse::new(user, pair)))
}

/// Exchanges a refresh token for a new token pair.
///
/// # Endpoint
///
/// `POST /api/auth/refresh`
///
/// # Errors
///
/// Returns 401 with a `reason` distinguishing expired, invalid, and
/// wrong-kind tokens (an access token presented here is rejected).
pub async fn refresh_handler(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<TokenPairResponse>, AppError> {
    payload.validate()?;

    let pair = state.user_service.refresh(&payload.refresh_token).await?;

    Ok(Json(TokenPairResponse::from(pair)))
}
