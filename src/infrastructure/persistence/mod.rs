//! PostgreSQL repository implementations.
//!
//! Queries are runtime-checked (`query_as` + `bind`); dynamic fragments are
//! limited to ORDER BY clauses rendered from closed enums.

mod pg_link_repository;
mod pg_product_repository;
mod pg_short_code_repository;
mod pg_theme_repository;
mod pg_user_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_product_repository::PgProductRepository;
pub use pg_short_code_repository::PgShortCodeRepository;
pub use pg_theme_repository::PgThemeRepository;
pub use pg_user_repository::PgUserRepository;
