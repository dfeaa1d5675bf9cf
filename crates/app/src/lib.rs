//! Shared application domain and persistence modules for the Tiffin
//! food-ordering backend.

pub mod auth;
pub mod chat;
pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
