//! Constant Texture

use core::geometry::*;
use core::texture::*;

/// Implements a texture that returns the same value everywhere.
#[derive(Clone)]
pub struct ConstantTexture<T> {
    /// The texture value.
    value: T,
}

impl<T> ConstantTexture<T> {
    /// Create a new `ConstantTexture<T>`.
    ///
    /// * `value` - The texture value.
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T> Texture<T> for ConstantTexture<T>
where
    T: Copy,
{
    /// Evaluate the texture at a surface point.
    ///
    /// * `uv`  - Surface (u, v) parametric coordinates.
    /// * `der` - Screen-space derivatives of the (u, v) coordinates.
    fn evaluate(&self, _uv: &Point2f, _der: &Derivatives) -> T {
        self.value
    }
}
