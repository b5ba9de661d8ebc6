//! Handler for the metadata preview endpoint.

use axum::{
    Json,
    extract::{Query, State},
};
use validator::Validate;

use crate::api::dto::metadata::MetadataQuery;
use crate::error::AppError;
use crate::infrastructure::metadata::{MetadataProvider, PageMetadata};
use crate::state::AppState;

/// Fetches display metadata for a URL.
///
/// # Endpoint
///
/// `GET /api/metadata?url=https://example.com`
///
/// Dashboards call this to preview a link card before saving it. The fetch
/// itself never fails — an unreachable or unparseable page yields a
/// hostname-derived placeholder — so the only error here is a missing or
/// malformed `url` parameter.
pub async fn metadata_handler(
    State(state): State<AppState>,
    Query(params): Query<MetadataQuery>,
) -> Result<Json<PageMetadata>, AppError> {
    params.validate()?;

    let metadata = state.metadata.fetch(&params.url).await;

    Ok(Json(metadata))
}
