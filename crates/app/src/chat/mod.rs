//! Chat assistant relay.

mod errors;
mod models;
mod relay;
mod service;

pub use errors::*;
pub use models::*;
pub use relay::{ChatRelayConfig, HttpChatRelay};
pub use service::*;
