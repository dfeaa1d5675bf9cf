//! Domain modules.

pub mod accounts;
pub mod carts;
pub mod catalog;
pub mod orders;
