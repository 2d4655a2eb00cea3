//! Core

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

// Re-export.
pub mod geometry;
pub mod memory;
pub mod mipmap;
pub mod pbrt;
pub mod spectrum;
pub mod texture;
