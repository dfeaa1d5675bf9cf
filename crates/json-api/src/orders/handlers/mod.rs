//! Order Handlers

pub(crate) mod advance;
pub(crate) mod cancel;
pub(crate) mod delivered;
pub(crate) mod index;
pub(crate) mod track;
