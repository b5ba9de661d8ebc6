mod link_repository;
mod product_repository;
mod short_code_repository;
mod theme_repository;
mod user_repository;

pub use link_repository::LinkRepository;
pub use product_repository::ProductRepository;
pub use short_code_repository::ShortCodeRepository;
pub use theme_repository::ThemeRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use product_repository::MockProductRepository;
#[cfg(test)]
pub use short_code_repository::MockShortCodeRepository;
#[cfg(test)]
pub use theme_repository::MockThemeRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
