//! PBRT common stuff

mod clamp;
mod common;
mod log2int;

// Re-export
pub use clamp::*;
pub use common::*;
pub use log2int::*;
