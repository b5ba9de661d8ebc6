//! Handlers for product management endpoints. Mirror the link handlers.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::pagination::{PageInfo, PageParams};
use crate::api::dto::products::{
    CreateProductRequest, ProductListResponse, ProductResponse, UpdateProductRequest,
};
use crate::application::services::AccessClaims;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the authenticated user's products.
///
/// # Endpoint
///
/// `GET /api/products?page=1&limit=20&sortBy=order&sortOrder=asc`
pub async fn list_products_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
    Query(params): Query<PageParams>,
) -> Result<Json<ProductListResponse>, AppError> {
    let query = params
        .validate_and_into_query()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (products, total) = state.product_service.list(claims.sub, query).await?;

    Ok(Json(ProductListResponse {
        pagination: PageInfo {
            page: params.page(),
            limit: params.limit(),
            total,
        },
        items: products.into_iter().map(ProductResponse::from).collect(),
    }))
}

/// Creates a product for the authenticated user.
///
/// # Endpoint
///
/// `POST /api/products`
pub async fn create_product_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    payload.validate()?;

    let product = state
        .product_service
        .create(claims.sub, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// Returns one of the authenticated user's products.
///
/// # Endpoint
///
/// `GET /api/products/{id}`
pub async fn get_product_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state.product_service.get(id, claims.sub).await?;

    Ok(Json(ProductResponse::from(product)))
}

/// Partially updates a product and invalidates its redirect cache entry.
///
/// # Endpoint
///
/// `PATCH /api/products/{id}`
pub async fn update_product_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    payload.validate()?;

    let product = state
        .product_service
        .update(id, claims.sub, payload.into())
        .await?;

    if let Err(e) = state.cache.invalidate(&product.short_code).await {
        tracing::warn!(error = ?e, short_code = %product.short_code, "Failed to invalidate cache after update");
    }

    Ok(Json(ProductResponse::from(product)))
}

/// Deletes a product, freeing its short code.
///
/// # Endpoint
///
/// `DELETE /api/products/{id}`
pub async fn delete_product_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
) -> Result<StatusCode, AppError> {
    let short_code = state.product_service.delete(id, claims.sub).await?;

    if let Err(e) = state.cache.invalidate(&short_code).await {
        tracing::warn!(error = ?e, short_code = %short_code, "Failed to invalidate cache after delete");
    }

    Ok(StatusCode::NO_CONTENT)
}
