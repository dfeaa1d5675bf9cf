//! Catalog: foods and the restaurants that serve them.

pub mod errors;
pub mod models;
pub mod repository;
pub mod service;

pub use errors::CatalogServiceError;
pub use repository::{CatalogRepository, MockCatalogRepository, PgCatalogRepository};
pub use service::*;
