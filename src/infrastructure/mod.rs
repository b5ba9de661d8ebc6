pub mod cache;
pub mod metadata;
pub mod persistence;
