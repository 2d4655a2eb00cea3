//! Per-texel Conversion

use crate::pbrt::*;
use crate::spectrum::RGBSpectrum;

/// Interface to convert texels into type `Tmemory` for MIPMap generation.
/// Scale and inverse gamma correction are applied here, before the values
/// enter the filtering pipeline.
pub trait ConvertIn<Tmemory> {
    /// Convert the texel to the type `Tmemory` and apply the scale and
    /// inverse gamma correction to texel values.
    ///
    /// * `scale` - Scale for the texel values.
    /// * `gamma` - Do gamma correction for the texel values.
    fn convert_in(&self, scale: Float, gamma: bool) -> Tmemory;
}

impl ConvertIn<RGBSpectrum> for RGBSpectrum {
    /// Convert the texel to `RGBSpectrum` and apply the scale and inverse
    /// gamma correction to texel values.
    ///
    /// * `scale` - Scale for the texel values.
    /// * `gamma` - Do gamma correction for the texel values.
    fn convert_in(&self, scale: Float, gamma: bool) -> RGBSpectrum {
        let mut rgb = self.to_rgb();
        for v in rgb.iter_mut() {
            *v = scale * if gamma { inv_gamma_correct(*v) } else { *v };
        }
        RGBSpectrum::from_rgb(&rgb)
    }
}

impl ConvertIn<Float> for RGBSpectrum {
    /// Convert the texel to its luminance and apply the scale and inverse
    /// gamma correction.
    ///
    /// * `scale` - Scale for the texel values.
    /// * `gamma` - Do gamma correction for the texel values.
    fn convert_in(&self, scale: Float, gamma: bool) -> Float {
        scale
            * if gamma {
                inv_gamma_correct(self.y())
            } else {
                self.y()
            }
    }
}
