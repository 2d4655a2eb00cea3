//! 2D (u, v) Mapping

use super::*;
use crate::pbrt::*;

/// Implements 2D (u, v) mapping.
pub struct UVMapping2D {
    /// Scale `u`.
    su: Float,

    /// Scale `v`.
    sv: Float,

    /// Shift `u`.
    du: Float,

    /// Shift `v`.
    dv: Float,
}

impl UVMapping2D {
    /// Create a new `UVMapping2D` with scale and shift values.
    ///
    /// * `su` - Scale `u`.
    /// * `sv` - Scale `v`.
    /// * `du` - Shift `u`.
    /// * `dv` - Shift `v`.
    pub fn new(su: Float, sv: Float, du: Float, dv: Float) -> Self {
        Self { su, sv, du, dv }
    }
}

impl Default for UVMapping2D {
    /// Returns a default value for `UVMapping2D` with no scaling or shifting.
    fn default() -> Self {
        Self::new(1.0, 1.0, 0.0, 0.0)
    }
}

impl TextureMapping2D for UVMapping2D {
    /// Returns the (s, t) texture coordinates and texture differentials.
    ///
    /// * `uv`  - Surface (u, v) parametric coordinates.
    /// * `der` - Screen-space derivatives of the (u, v) coordinates.
    fn map(&self, uv: &Point2f, der: &Derivatives) -> TextureMap2DResult {
        // Compute texture differentials for 2D identity mapping.
        let dstdx = Vector2f::new(self.su * der.dudx, self.sv * der.dvdx);
        let dstdy = Vector2f::new(self.su * der.dudy, self.sv * der.dvdy);
        let p = Point2f::new(self.su * uv.x + self.du, self.sv * uv.y + self.dv);
        TextureMap2DResult::new(p, dstdx, dstdy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_mapping_passes_through() {
        let map = UVMapping2D::default();
        let der = Derivatives {
            dudx: 0.1,
            dvdx: 0.2,
            dudy: 0.3,
            dvdy: 0.4,
        };
        let r = map.map(&Point2f::new(0.25, 0.75), &der);
        assert_eq!(r.p, Point2f::new(0.25, 0.75));
        assert_eq!(r.dstdx, Vector2f::new(0.1, 0.2));
        assert_eq!(r.dstdy, Vector2f::new(0.3, 0.4));
    }

    #[test]
    fn scale_and_shift_apply_to_point_and_differentials() {
        let map = UVMapping2D::new(2.0, 4.0, 0.5, -0.5);
        let der = Derivatives {
            dudx: 0.1,
            dvdx: 0.1,
            dudy: 0.0,
            dvdy: 0.0,
        };
        let r = map.map(&Point2f::new(0.5, 0.5), &der);
        assert_eq!(r.p, Point2f::new(1.5, 1.5));
        assert_eq!(r.dstdx, Vector2f::new(0.2, 0.4));
        // Shifts do not affect differentials.
        assert_eq!(r.dstdy, Vector2f::zero());
    }
}
