//! Handler for public short-code redirects.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::click_event::{ClickEvent, ClickTarget};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::short_code::is_valid_short_code;

/// Cached redirect target. Carries the owner so cache hits can still
/// attribute the click to the right counter.
#[derive(Debug, Serialize, Deserialize)]
struct CachedTarget {
    url: String,
    kind: String,
    id: i64,
}

/// Resolves a short code and redirects to its target URL.
///
/// # Endpoint
///
/// `GET /s/{code}`
///
/// # Resolution
///
/// 1. Redirect cache (fail-open)
/// 2. Links by code
/// 3. Products by code
///
/// Inactive records do not redirect. Every successful resolution enqueues
/// a click event; a full queue drops the click rather than delaying the
/// redirect.
///
/// # Errors
///
/// Returns 404 for unknown or malformed codes.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let not_found =
        || AppError::not_found("Short link not found", json!({ "short_code": code.clone() }));

    // Codes outside the accepted format can't exist; skip the lookups.
    if !is_valid_short_code(&code) {
        return Err(not_found());
    }

    if let Ok(Some(cached)) = state.cache.get_target(&code).await
        && let Ok(target) = serde_json::from_str::<CachedTarget>(&cached)
    {
        record_click(&state, &target.kind, target.id);
        metrics::counter!("redirects_total", "source" => "cache").increment(1);
        return Ok(Redirect::temporary(&target.url));
    }

    if let Some(link) = state.link_service.resolve(&code).await? {
        cache_target(&state, &code, &link.url, "link", link.id).await;
        record_click(&state, "link", link.id);
        metrics::counter!("redirects_total", "source" => "db").increment(1);
        return Ok(Redirect::temporary(&link.url));
    }

    if let Some(product) = state.product_service.resolve(&code).await? {
        cache_target(&state, &code, &product.url, "product", product.id).await;
        record_click(&state, "product", product.id);
        metrics::counter!("redirects_total", "source" => "db").increment(1);
        return Ok(Redirect::temporary(&product.url));
    }

    Err(not_found())
}

/// Enqueues a click for the background worker. Non-blocking: a full queue
/// drops the event with a warning.
fn record_click(state: &AppState, kind: &str, id: i64) {
    let target = match kind {
        "product" => ClickTarget::Product(id),
        _ => ClickTarget::Link(id),
    };

    if state.click_tx.try_send(ClickEvent { target }).is_err() {
        tracing::warn!(?target, "Click queue full, dropping event");
    }
}

async fn cache_target(state: &AppState, code: &str, url: &str, kind: &str, id: i64) {
    let entry = CachedTarget {
        url: url.to_string(),
        kind: kind.to_string(),
        id,
    };

    match serde_json::to_string(&entry) {
        Ok(serialized) => {
            if let Err(e) = state.cache.set_target(code, &serialized, None).await {
                tracing::warn!(error = ?e, code, "Failed to cache redirect target");
            }
        }
        Err(e) => tracing::warn!(error = %e, code, "Failed to serialize cache entry"),
    }
}
