/// Colors and the geometry primitives shared across the crate.
pub mod core;
/// Error type and result alias.
pub mod error;
/// Screen-space <-> image-space conversion.
pub mod mapper;
