//! Accounts: users and their order history.

pub mod errors;
pub mod models;
pub mod repository;
pub mod service;

pub use errors::AccountsServiceError;
pub use repository::{AccountsRepository, MockAccountsRepository, PgAccountsRepository};
pub use service::*;
