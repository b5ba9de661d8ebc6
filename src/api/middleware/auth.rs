//! Bearer token authentication middleware.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Extracts the token from an `Authorization` header.
///
/// Accepts exactly the two-token form `Bearer <token>`. A missing header,
/// a different scheme, extra segments, or a non-UTF8 value all yield
/// `None` — this is a parse, not a verification step.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Some(token.to_string()),
        _ => None,
    }
}

/// Authenticates requests using Bearer access tokens.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <access token>
/// ```
///
/// # Authentication Flow
///
/// 1. Parse the token out of the `Authorization` header
/// 2. Verify signature, expiry, and token kind
/// 3. Insert the verified [`AccessClaims`] into request extensions
/// 4. Continue to the next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` with a distinguishing `reason` when the
/// header is missing/malformed, the token is expired, invalid, or a
/// refresh token was presented.
///
/// [`AccessClaims`]: crate::application::services::AccessClaims
pub async fn layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).ok_or_else(|| {
        AppError::unauthorized(
            "Unauthorized",
            json!({ "reason": "missing bearer token" }),
        )
    })?;

    let claims = state.token_service.verify_access(&token)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_well_formed_header() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header_is_no_token() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_wrong_scheme_is_no_token() {
        assert_eq!(bearer_token(&headers_with("Basic abc")), None);
    }

    #[test]
    fn test_extra_segments_are_no_token() {
        assert_eq!(bearer_token(&headers_with("Bearer abc def")), None);
    }

    #[test]
    fn test_scheme_alone_is_no_token() {
        assert_eq!(bearer_token(&headers_with("Bearer")), None);
    }

    #[test]
    fn test_scheme_is_case_sensitive() {
        assert_eq!(bearer_token(&headers_with("bearer abc")), None);
    }
}
