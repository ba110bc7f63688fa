#![forbid(unsafe_code)]

//! Core: tree model, host contracts, pointer geometry, and frame coalescing.

pub mod frame;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod tree;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace};
