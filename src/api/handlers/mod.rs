mod auth;
mod health;
mod links;
mod metadata;
mod products;
mod redirect;
mod themes;
mod users;

pub use auth::{login_handler, refresh_handler, register_handler};
pub use health::health_handler;
pub use links::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
    update_link_handler,
};
pub use metadata::metadata_handler;
pub use products::{
    create_product_handler, delete_product_handler, get_product_handler, list_products_handler,
    update_product_handler,
};
pub use redirect::redirect_handler;
pub use themes::{get_theme_handler, put_theme_handler};
pub use users::{me_handler, update_me_handler};
