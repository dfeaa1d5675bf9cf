//! Orders: checkout aggregation and the per-sub-order lifecycle.

pub mod errors;
pub mod models;
pub mod repository;
pub mod service;
pub mod status;

pub use errors::OrdersServiceError;
pub use repository::{MockOrdersRepository, OrdersRepository, PgOrdersRepository};
pub use service::*;
pub use status::{OverallStatus, SubOrderStatus, derive_overall};
