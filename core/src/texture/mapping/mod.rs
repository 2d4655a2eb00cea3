//! Texture Mappings

use super::Derivatives;
use crate::geometry::*;
use std::sync::Arc;

/// Stores the result of mapping a surface point into texture space: the
/// (s, t) coordinates plus the two differential vectors that describe the
/// footprint a shading sample covers.
#[derive(Copy, Clone, Debug, Default)]
pub struct TextureMap2DResult {
    /// The (s, t) point in texture space.
    pub p: Point2f,

    /// Change in (s, t) with respect to screen x.
    pub dstdx: Vector2f,

    /// Change in (s, t) with respect to screen y.
    pub dstdy: Vector2f,
}

impl TextureMap2DResult {
    /// Create a new `TextureMap2DResult`.
    ///
    /// * `p`     - The (s, t) point in texture space.
    /// * `dstdx` - Change in (s, t) with respect to screen x.
    /// * `dstdy` - Change in (s, t) with respect to screen y.
    pub fn new(p: Point2f, dstdx: Vector2f, dstdy: Vector2f) -> Self {
        Self { p, dstdx, dstdy }
    }
}

/// Interface for 2D texture coordinate mapping strategies.
pub trait TextureMapping2D {
    /// Returns the (s, t) texture coordinates and texture differentials.
    ///
    /// * `uv`  - Surface (u, v) parametric coordinates.
    /// * `der` - Screen-space derivatives of the (u, v) coordinates.
    fn map(&self, uv: &Point2f, der: &Derivatives) -> TextureMap2DResult;
}

/// Atomic reference counted `TextureMapping2D`.
pub type ArcTextureMapping2D = Arc<dyn TextureMapping2D + Send + Sync>;

mod uv_2d;

// Re-export
pub use uv_2d::*;
