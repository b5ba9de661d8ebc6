pub mod auth;
pub mod health;
pub mod links;
pub mod metadata;
pub mod pagination;
pub mod products;
pub mod users;
