mod link_service;
mod product_service;
mod theme_service;
mod token_service;
mod user_service;

pub use link_service::{CreateLink, LinkService, UpdateLink};
pub use product_service::{CreateProduct, ProductService, UpdateProduct};
pub use theme_service::ThemeService;
pub use token_service::{
    AccessClaims, REFRESH_TTL_DAYS, RefreshClaims, TokenError, TokenPair, TokenService,
};
pub use user_service::{Registration, UserService};
