//! Carts: the single active cart each customer owns.

pub mod errors;
pub mod models;
pub mod repository;
pub mod service;

pub use errors::CartsServiceError;
pub use repository::{CartsRepository, MockCartsRepository, PgCartsRepository};
pub use service::*;
