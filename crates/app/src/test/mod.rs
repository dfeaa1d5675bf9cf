//! Shared test infrastructure: in-memory repositories and a ready-made
//! context wiring every service over them.

mod memory;

pub(crate) use context::TestContext;
