//! Handlers for link management endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::links::{
    CreateLinkRequest, LinkListResponse, LinkResponse, UpdateLinkRequest,
};
use crate::api::dto::pagination::{PageInfo, PageParams};
use crate::application::services::AccessClaims;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the authenticated user's links.
///
/// # Endpoint
///
/// `GET /api/links?page=1&limit=20&sortBy=order&sortOrder=asc`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
    Query(params): Query<PageParams>,
) -> Result<Json<LinkListResponse>, AppError> {
    let query = params
        .validate_and_into_query()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (links, total) = state.link_service.list(claims.sub, query).await?;

    Ok(Json(LinkListResponse {
        pagination: PageInfo {
            page: params.page(),
            limit: params.limit(),
            total,
        },
        items: links.into_iter().map(LinkResponse::from).collect(),
    }))
}

/// Creates a link for the authenticated user.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// Omitted display fields are filled from the target page's metadata; an
/// omitted short code is allocated randomly.
///
/// # Errors
///
/// Returns 400 on validation failure, 409 when a supplied short code is
/// taken, and 500 when code allocation exhausts its attempts.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state.link_service.create(claims.sub, payload.into()).await?;

    Ok((StatusCode::CREATED, Json(LinkResponse::from(link))))
}

/// Returns one of the authenticated user's links.
///
/// # Endpoint
///
/// `GET /api/links/{id}`
pub async fn get_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get(id, claims.sub).await?;

    Ok(Json(LinkResponse::from(link)))
}

/// Partially updates a link.
///
/// # Endpoint
///
/// `PATCH /api/links/{id}`
///
/// # Cache
///
/// The redirect cache entry for this link is invalidated so the next
/// redirect uses the updated destination.
pub async fn update_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .update(id, claims.sub, payload.into())
        .await?;

    if let Err(e) = state.cache.invalidate(&link.short_code).await {
        tracing::warn!(error = ?e, short_code = %link.short_code, "Failed to invalidate cache after update");
    }

    Ok(Json(LinkResponse::from(link)))
}

/// Deletes a link, freeing its short code.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// # Errors
///
/// Returns 404 if the link doesn't exist or belongs to another user.
pub async fn delete_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
) -> Result<StatusCode, AppError> {
    let short_code = state.link_service.delete(id, claims.sub).await?;

    if let Err(e) = state.cache.invalidate(&short_code).await {
        tracing::warn!(error = ?e, short_code = %short_code, "Failed to invalidate cache after delete");
    }

    Ok(StatusCode::NO_CONTENT)
}
