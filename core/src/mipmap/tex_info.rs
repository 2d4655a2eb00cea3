//! TexInfo

use crate::mipmap::{FilteringMethod, ImageWrap};
use crate::pbrt::Float;
use ordered_float::OrderedFloat;
use std::hash::{Hash, Hasher};

/// Stores the configuration an image map is filtered with. Hashable so
/// renderers can key MIPMap caches on it.
#[derive(Clone, Debug)]
pub struct TexInfo {
    /// Type of filtering to use for mipmaps.
    pub filtering_method: FilteringMethod,

    /// Image wrapping convention.
    pub wrap_mode: ImageWrap,

    /// Scale for the texel values.
    pub scale: Float,

    /// Do gamma correction for the texel values.
    pub gamma: bool,

    /// Used to clamp the ellipse eccentricity (EWA).
    pub max_anisotropy: Float,
}

impl TexInfo {
    /// Create a new `TexInfo`.
    ///
    /// * `filtering_method` - Type of filtering to use for mipmaps.
    /// * `wrap_mode`        - Image wrapping convention.
    /// * `scale`            - Scale for the texel values.
    /// * `gamma`            - Do gamma correction for the texel values.
    /// * `max_anisotropy`   - Used to clamp the ellipse eccentricity (EWA).
    pub fn new(
        filtering_method: FilteringMethod,
        wrap_mode: ImageWrap,
        scale: Float,
        gamma: bool,
        max_anisotropy: Float,
    ) -> Self {
        Self {
            filtering_method,
            wrap_mode,
            scale,
            gamma,
            max_anisotropy,
        }
    }
}

impl Default for TexInfo {
    /// Returns the default configuration: EWA filtering, repeat wrapping, no
    /// scaling or gamma correction.
    fn default() -> Self {
        Self::new(FilteringMethod::Ewa, ImageWrap::Repeat, 1.0, false, 8.0)
    }
}

impl PartialEq for TexInfo {
    /// Checks if all fields are equal.
    ///
    /// * `other` - Another instance of `TexInfo`.
    fn eq(&self, other: &Self) -> bool {
        self.filtering_method == other.filtering_method
            && self.wrap_mode == other.wrap_mode
            && self.scale == other.scale
            && self.gamma == other.gamma
            && self.max_anisotropy == other.max_anisotropy
    }
}

impl Eq for TexInfo {}

impl Hash for TexInfo {
    /// Feeds this value into the given `Hasher`.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.filtering_method.hash(state);
        self.wrap_mode.hash(state);
        self.gamma.hash(state);
        OrderedFloat::from(self.scale).hash(state);
        OrderedFloat::from(self.max_anisotropy).hash(state);
    }
}
