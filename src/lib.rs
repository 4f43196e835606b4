// Public library interface for dyntree-rs
// The binaries drive these modules; the integration tests use them directly.

pub mod geometry;
pub mod layout;
pub mod loader;
pub mod metrics;
pub mod render;
pub mod tree;
pub mod treemap;
pub mod ui;
