mod common;

use axum::{Router, middleware, routing::get};
use axum_test::TestServer;

use biolink::api::handlers::metadata_handler;
use biolink::api::middleware::auth;
use biolink::state::AppState;

/// Build a test server with the metadata route behind the auth middleware,
/// exactly as it is mounted in production.
fn make_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/api/metadata", get(metadata_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .with_state(state);
    TestServer::new(app).unwrap()
}

// ─── Authentication ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let (state, _rx) = common::create_test_state();
    let server = make_server(state);

    let response = server.get("/api/metadata?url=https://example.com").await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_wrong_scheme_is_unauthorized() {
    let (state, _rx) = common::create_test_state();
    let server = make_server(state);

    let response = server
        .get("/api/metadata?url=https://example.com")
        .add_header("Authorization", "Basic abc")
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_refresh_token_is_rejected_as_wrong_kind() {
    let (state, _rx) = common::create_test_state();
    let refresh = common::refresh_token_for(&state, 1);
    let server = make_server(state);

    let response = server
        .get("/api/metadata?url=https://example.com")
        .add_header("Authorization", format!("Bearer {}", refresh))
        .await;

    response.assert_status_unauthorized();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["details"]["reason"], "wrong token kind");
}

#[tokio::test]
async fn test_garbage_token_is_invalid() {
    let (state, _rx) = common::create_test_state();
    let server = make_server(state);

    let response = server
        .get("/api/metadata?url=https://example.com")
        .add_header("Authorization", "Bearer not.a.token")
        .await;

    response.assert_status_unauthorized();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["details"]["reason"], "invalid token");
}

// ─── Fetch behavior ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unreachable_host_yields_placeholder_not_error() {
    let (state, _rx) = common::create_test_state();
    let token = common::access_token_for(&state, 1, "alice");
    let server = make_server(state);

    // `.invalid` is a reserved TLD: resolution always fails, and the
    // handler's contract is to degrade to a hostname placeholder.
    let response = server
        .get("/api/metadata?url=https://nope.invalid/page")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["title"], "nope.invalid");
    assert_eq!(body["description"], "Visit nope.invalid");
    assert_eq!(body["type"], "website");
}

#[tokio::test]
async fn test_malformed_url_is_bad_request() {
    let (state, _rx) = common::create_test_state();
    let token = common::access_token_for(&state, 1, "alice");
    let server = make_server(state);

    let response = server
        .get("/api/metadata?url=not-a-url")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;

    response.assert_status_bad_request();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "validation_error");
}
