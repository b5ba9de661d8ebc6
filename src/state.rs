//! Shared application state injected into all handlers.

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{
    LinkService, ProductService, ThemeService, TokenService, UserService,
};
use crate::domain::click_event::ClickEvent;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::metadata::HttpMetadataFetcher;
use crate::infrastructure::persistence::{
    PgLinkRepository, PgProductRepository, PgShortCodeRepository, PgThemeRepository,
    PgUserRepository,
};

/// Production service types, concrete over the Pg repositories.
pub type AppUserService = UserService<PgUserRepository>;
pub type AppLinkService = LinkService<PgLinkRepository, PgShortCodeRepository, HttpMetadataFetcher>;
pub type AppProductService =
    ProductService<PgProductRepository, PgShortCodeRepository, HttpMetadataFetcher>;
pub type AppThemeService = ThemeService<PgThemeRepository>;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<AppUserService>,
    pub link_service: Arc<AppLinkService>,
    pub product_service: Arc<AppProductService>,
    pub theme_service: Arc<AppThemeService>,
    pub token_service: Arc<TokenService>,
    pub metadata: Arc<HttpMetadataFetcher>,
    pub cache: Arc<dyn CacheService>,
    pub click_tx: mpsc::Sender<ClickEvent>,
    /// Kept for direct liveness probes in the health endpoint.
    pub db: Arc<PgPool>,
}
