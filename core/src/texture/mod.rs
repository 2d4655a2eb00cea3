//! Textures

use crate::geometry::*;
use crate::pbrt::Float;
use std::sync::Arc;

/// Texture interface.
pub trait Texture<T: Copy> {
    /// Evaluate the texture at a surface point.
    ///
    /// * `uv`  - Surface (u, v) parametric coordinates.
    /// * `der` - Screen-space derivatives of the (u, v) coordinates.
    fn evaluate(&self, uv: &Point2f, der: &Derivatives) -> T;
}

/// Atomic reference counted `Texture`.
pub type ArcTexture<T> = Arc<dyn Texture<T> + Send + Sync>;

/// Screen-space derivatives of the surface (u, v) parameterization,
/// supplied by the intersection code.
#[derive(Copy, Clone, Debug, Default)]
pub struct Derivatives {
    /// Change in `u` with respect to screen `x`.
    pub dudx: Float,

    /// Change in `v` with respect to screen `x`.
    pub dvdx: Float,

    /// Change in `u` with respect to screen `y`.
    pub dudy: Float,

    /// Change in `v` with respect to screen `y`.
    pub dvdy: Float,
}

mod common;
mod mapping;

// Re-export
pub use common::*;
pub use mapping::*;
