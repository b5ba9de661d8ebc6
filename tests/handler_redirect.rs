mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;

use biolink::api::handlers::redirect_handler;
use biolink::state::AppState;

fn make_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/s/{code}", get(redirect_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_malformed_code_is_not_found() {
    let (state, _rx) = common::create_test_state();
    let server = make_server(state);

    // Too short for the accepted format; rejected before any lookup.
    let response = server.get("/s/ab").await;

    response.assert_status_not_found();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_code_with_space_is_not_found() {
    let (state, _rx) = common::create_test_state();
    let server = make_server(state);

    let response = server.get("/s/bad%20code").await;

    response.assert_status_not_found();
}
