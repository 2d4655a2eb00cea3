//! RGB Spectrum

use crate::pbrt::*;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub};

/// Number of samples in `RGBSpectrum`.
pub const RGB_SAMPLES: usize = 3;

/// Represents a spectral power distribution with a red, green and blue
/// component.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RGBSpectrum {
    /// The RGB components.
    pub c: [Float; RGB_SAMPLES],
}

impl RGBSpectrum {
    /// Create a new `RGBSpectrum` with a constant value across all components.
    ///
    /// * `v` - Constant value.
    pub fn new(v: Float) -> Self {
        Self { c: [v, v, v] }
    }

    /// Create a new `RGBSpectrum` from RGB component values.
    ///
    /// * `rgb` - The RGB component values.
    pub fn from_rgb(rgb: &[Float; 3]) -> Self {
        Self {
            c: [rgb[0], rgb[1], rgb[2]],
        }
    }

    /// Returns the RGB component values.
    pub fn to_rgb(&self) -> [Float; 3] {
        self.c
    }

    /// Returns the y-coefficient of the XYZ colour, the luminance.
    pub fn y(&self) -> Float {
        const W: [Float; 3] = [0.212671, 0.715160, 0.072169];
        W[0] * self.c[0] + W[1] * self.c[1] + W[2] * self.c[2]
    }

    /// Returns true if the values are zero everywhere.
    pub fn is_black(&self) -> bool {
        self.c.iter().all(|v| *v == 0.0)
    }

    /// Returns true if any component is NaN.
    pub fn has_nans(&self) -> bool {
        self.c.iter().any(|v| v.is_nan())
    }
}

impl Add for RGBSpectrum {
    type Output = Self;

    /// Adds the components of the given spectrum and returns the result.
    ///
    /// * `other` - The spectrum to add.
    fn add(self, other: Self) -> Self::Output {
        Self::Output {
            c: [
                self.c[0] + other.c[0],
                self.c[1] + other.c[1],
                self.c[2] + other.c[2],
            ],
        }
    }
}

impl AddAssign for RGBSpectrum {
    /// Performs the `+=` operation.
    ///
    /// * `other` - The spectrum to add.
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for RGBSpectrum {
    type Output = Self;

    /// Subtracts the components of the given spectrum and returns the result.
    ///
    /// * `other` - The spectrum to subtract.
    fn sub(self, other: Self) -> Self::Output {
        Self::Output {
            c: [
                self.c[0] - other.c[0],
                self.c[1] - other.c[1],
                self.c[2] - other.c[2],
            ],
        }
    }
}

impl Mul<Float> for RGBSpectrum {
    type Output = Self;

    /// Scales the components by a scalar and returns the result.
    ///
    /// * `f` - The scalar to multiply.
    fn mul(self, f: Float) -> Self::Output {
        Self::Output {
            c: [self.c[0] * f, self.c[1] * f, self.c[2] * f],
        }
    }
}

impl MulAssign<Float> for RGBSpectrum {
    /// Performs the `*=` operation with a scalar.
    ///
    /// * `f` - The scalar to multiply.
    fn mul_assign(&mut self, f: Float) {
        *self = *self * f;
    }
}

impl Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    /// Scales the components of a spectrum and returns the result.
    ///
    /// * `s` - The spectrum to scale.
    fn mul(self, s: RGBSpectrum) -> Self::Output {
        s * self
    }
}

impl Div<Float> for RGBSpectrum {
    type Output = Self;

    /// Divides the components by a scalar and returns the result.
    ///
    /// * `f` - The scalar to divide by.
    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0);
        let inv = 1.0 / f;
        self * inv
    }
}

impl DivAssign<Float> for RGBSpectrum {
    /// Performs the `/=` operation with a scalar.
    ///
    /// * `f` - The scalar to divide by.
    fn div_assign(&mut self, f: Float) {
        *self = *self / f;
    }
}

impl Clamp<Float> for RGBSpectrum {
    /// Clamps each component into [low, high].
    ///
    /// * `low`  - Lower bound.
    /// * `high` - Upper bound.
    fn clamp(&self, low: Float, high: Float) -> Self {
        Self {
            c: [
                clamp(self.c[0], low, high),
                clamp(self.c[1], low, high),
                clamp(self.c[2], low, high),
            ],
        }
    }

    /// Clamps each component into [0, ∞).
    fn clamp_default(&self) -> Self {
        Clamp::clamp(self, 0.0, INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn arithmetic_is_componentwise() {
        let a = RGBSpectrum::from_rgb(&[1.0, 2.0, 3.0]);
        let b = RGBSpectrum::from_rgb(&[0.5, 0.5, 0.5]);
        assert_eq!(a + b, RGBSpectrum::from_rgb(&[1.5, 2.5, 3.5]));
        assert_eq!(a - b, RGBSpectrum::from_rgb(&[0.5, 1.5, 2.5]));
        assert_eq!(a * 2.0, RGBSpectrum::from_rgb(&[2.0, 4.0, 6.0]));
        assert_eq!(a / 2.0, RGBSpectrum::from_rgb(&[0.5, 1.0, 1.5]));
        assert_eq!(2.0 * a, a * 2.0);

        let mut m = a;
        m *= 2.0;
        assert_eq!(m, a * 2.0);
        m /= 2.0;
        assert_eq!(m, a);
    }

    #[test]
    fn clamp_default_floors_negative_components() {
        let s = RGBSpectrum::from_rgb(&[-0.5, 0.25, 1.0]);
        assert_eq!(s.clamp_default(), RGBSpectrum::from_rgb(&[0.0, 0.25, 1.0]));
    }

    #[test]
    fn luminance_of_white_is_one() {
        assert!(approx_eq!(
            Float,
            RGBSpectrum::new(1.0).y(),
            1.0,
            epsilon = 1e-5
        ));
    }

    #[test]
    fn black_detection() {
        assert!(RGBSpectrum::new(0.0).is_black());
        assert!(!RGBSpectrum::new(0.1).is_black());
    }
}
