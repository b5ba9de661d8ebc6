//! API route configuration.
//!
//! All routes here require Bearer token authentication via
//! [`crate::api::middleware::auth`]; the auth endpoints themselves are
//! wired separately in [`crate::routes`].

use crate::api::handlers::{
    create_link_handler, create_product_handler, delete_link_handler, delete_product_handler,
    get_link_handler, get_product_handler, get_theme_handler, list_links_handler,
    list_products_handler, login_handler, me_handler, metadata_handler, put_theme_handler,
    refresh_handler, register_handler, update_link_handler, update_me_handler,
    update_product_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /users/me`       - Authenticated profile
/// - `PATCH  /users/me`       - Update profile
/// - `GET    /links`          - List links (paginated, sortable)
/// - `POST   /links`          - Create a link
/// - `GET    /links/{id}`     - Fetch a link
/// - `PATCH  /links/{id}`     - Update a link
/// - `DELETE /links/{id}`     - Delete a link
/// - `/products`, `/products/{id}` - Same surface for products
/// - `GET    /theme`          - Theme settings (defaults if unsaved)
/// - `PUT    /theme`          - Replace theme settings
/// - `GET    /metadata?url=…` - Metadata preview (always 200)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(me_handler).patch(update_me_handler))
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{id}",
            get(get_link_handler)
                .patch(update_link_handler)
                .delete(delete_link_handler),
        )
        .route(
            "/products",
            get(list_products_handler).post(create_product_handler),
        )
        .route(
            "/products/{id}",
            get(get_product_handler)
                .patch(update_product_handler)
                .delete(delete_product_handler),
        )
        .route("/theme", get(get_theme_handler).put(put_theme_handler))
        .route("/metadata", get(metadata_handler))
}

/// Public authentication routes (register/login/refresh).
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/refresh", post(refresh_handler))
}
