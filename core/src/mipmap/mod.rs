//! MIPMap

use crate::geometry::*;
use crate::memory::*;
use crate::pbrt::*;
use crate::spectrum::RGBSpectrum;
use crate::texture::lanczos;
use rayon::prelude::*;
use std::error;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul};
use std::sync::Arc;

mod convert_in;
mod tex_info;

// Re-export
pub use convert_in::*;
pub use tex_info::*;

/// Size of the radial weights lookup table.
const WEIGHT_LUT_SIZE: usize = 128;

/// Falloff rate of the Gaussian radial weights.
const WEIGHT_LUT_ALPHA: Float = 2.0;

lazy_static! {
    /// Precomputed table of Gaussian filter values indexed by the normalized
    /// squared radius from the ellipse center. Shared by every pyramid in the
    /// process and initialized exactly once.
    static ref WEIGHT_LUT: [Float; WEIGHT_LUT_SIZE] = {
        let mut lut = [0.0; WEIGHT_LUT_SIZE];
        for (i, w) in lut.iter_mut().enumerate() {
            let r2 = i as Float / (WEIGHT_LUT_SIZE - 1) as Float;
            *w = (-WEIGHT_LUT_ALPHA * r2).exp() - (-WEIGHT_LUT_ALPHA).exp();
        }
        lut
    };
}

/// Algebraic operations a sample type must support for filtering: a zero
/// value (`Default`), addition and scaling by `Float`. The filters never
/// inspect the channel structure of the type.
pub trait Texel:
    Copy
    + Default
    + Send
    + Sync
    + Add<Output = Self>
    + AddAssign
    + Mul<Float, Output = Self>
    + Div<Float, Output = Self>
    + Clamp<Float>
{
}

impl Texel for Float {}
impl Texel for RGBSpectrum {}

/// Enumeration for the image wrapping convention for out-of-bounds texels.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum ImageWrap {
    /// Repeat.
    Repeat,
    /// Black.
    Black,
    /// Clamp.
    Clamp,
}

/// MIPMap texture filtering methods.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum FilteringMethod {
    /// Trilinear interpolation.
    Trilinear,

    /// Elliptically weighted average.
    Ewa,
}

/// Holds details for image reconstruction.
#[derive(Copy, Clone, Debug, Default)]
pub struct ResampleWeight {
    /// Offset to the first of the 4 contributing source texels. Can start
    /// before the axis origin near the left image edge.
    pub first_texel: i32,

    /// The weight values for 4 texels. Normalized to sum to 1.
    pub weight: [Float; 4],
}

/// Error raised when a MIPMap cannot be constructed from the given image.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MIPMapError {
    /// The image resolution has a zero dimension.
    InvalidImageDimensions(usize, usize),

    /// The texel buffer length does not match the image resolution.
    TexelBufferSize {
        /// Number of texels the resolution requires.
        expected: usize,

        /// Number of texels supplied.
        actual: usize,
    },
}

impl fmt::Display for MIPMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidImageDimensions(width, height) => {
                write!(f, "invalid image dimensions {width}x{height}")
            }
            Self::TexelBufferSize { expected, actual } => {
                write!(f, "expected {expected} texels, got {actual}")
            }
        }
    }
}

impl error::Error for MIPMapError {}

/// Implements methods for efficient texture filtering with spatially varying
/// filter widths, backed by an image pyramid of increasingly lower resolution
/// prefiltered versions of the original image.
#[derive(Clone, Debug)]
pub struct MIPMap<T> {
    /// Filtering method used at lookup time.
    filtering_method: FilteringMethod,

    /// Determines how to handle out-of-bounds texels.
    wrap_mode: ImageWrap,

    /// Image resolution of the finest pyramid level.
    resolution: Point2<usize>,

    /// The image pyramid; level 0 is the finest, the last level is 1x1.
    pyramid: Vec<BlockedArray<T>>,

    /// Used to clamp the ellipse eccentricity (EWA).
    max_anisotropy: Float,
}

/// Atomic reference counted `MIPMap`.
pub type ArcMIPMap<T> = Arc<MIPMap<T>>;

impl<T: Texel> MIPMap<T> {
    /// Builds the image pyramid. The image is first resampled up to
    /// power-of-two dimensions when necessary; afterwards the pyramid is
    /// immutable and lookups may run concurrently without locking.
    ///
    /// * `resolution`       - Image resolution.
    /// * `img`              - Image data in row-major order.
    /// * `filtering_method` - MIPMap filtering method to use.
    /// * `wrap_mode`        - Determines how to handle out-of-bounds texels.
    /// * `max_anisotropy`   - Used to clamp the ellipse eccentricity (EWA).
    pub fn new(
        resolution: &Point2<usize>,
        img: &[T],
        filtering_method: FilteringMethod,
        wrap_mode: ImageWrap,
        max_anisotropy: Float,
    ) -> Result<Self, MIPMapError> {
        if resolution.x == 0 || resolution.y == 0 {
            return Err(MIPMapError::InvalidImageDimensions(
                resolution.x,
                resolution.y,
            ));
        }
        let n_texels = resolution.x * resolution.y;
        if img.len() != n_texels {
            return Err(MIPMapError::TexelBufferSize {
                expected: n_texels,
                actual: img.len(),
            });
        }
        debug_assert!(filtering_method != FilteringMethod::Ewa || max_anisotropy > 0.0);

        let (resolution, resampled_image) =
            if !resolution.x.is_power_of_two() || !resolution.y.is_power_of_two() {
                // Resample image to power-of-two resolution.
                let res_pow2 = Point2::new(
                    resolution.x.next_power_of_two(),
                    resolution.y.next_power_of_two(),
                );
                info!(
                    "Resampling MIPMap from {}x{} to {}x{}",
                    resolution.x, resolution.y, res_pow2.x, res_pow2.y,
                );
                let resampled = resample(img, resolution, &res_pow2, wrap_mode);
                (res_pow2, Some(resampled))
            } else {
                (*resolution, None)
            };

        // Initialize levels of MIPMap from image.
        let n_levels = 1 + Log2Int::log2int(max(resolution.x, resolution.y)) as usize;
        let mut pyramid: Vec<BlockedArray<T>> = Vec::with_capacity(n_levels);

        // Initialize most detailed level of MIPMap.
        pyramid.push(BlockedArray::from_slice(
            resolution.x,
            resolution.y,
            resampled_image.as_deref().unwrap_or(img),
        ));

        for i in 1..n_levels {
            // Initialize i'th MIPMap level from the i-1'st level. The finer
            // level is complete at this point; rows of the new level have no
            // cross-texel dependency and run in parallel.
            let s_res = max(1, pyramid[i - 1].u_size() / 2);
            let t_res = max(1, pyramid[i - 1].v_size() / 2);

            let prev = &pyramid[i - 1];
            let mut texels = vec![T::default(); s_res * t_res];
            texels
                .par_chunks_mut(s_res)
                .enumerate()
                .for_each(|(t, row)| {
                    // Filter four texels from finer level of pyramid.
                    for (s, texel) in row.iter_mut().enumerate() {
                        let (si, ti) = (2 * s as i32, 2 * t as i32);
                        *texel = (texel_at(prev, wrap_mode, si, ti)
                            + texel_at(prev, wrap_mode, si + 1, ti)
                            + texel_at(prev, wrap_mode, si, ti + 1)
                            + texel_at(prev, wrap_mode, si + 1, ti + 1))
                            * 0.25;
                    }
                });
            pyramid.push(BlockedArray::from_slice(s_res, t_res, &texels));
        }

        Ok(Self {
            filtering_method,
            wrap_mode,
            resolution,
            pyramid,
            max_anisotropy,
        })
    }

    /// Returns the width of the highest resolution level.
    pub fn width(&self) -> usize {
        self.resolution.x
    }

    /// Returns the height of the highest resolution level.
    pub fn height(&self) -> usize {
        self.resolution.y
    }

    /// Returns the number of MIPMap levels.
    pub fn levels(&self) -> usize {
        self.pyramid.len()
    }

    /// Returns the texel at `(s, t)` of the given level, resolving
    /// out-of-range coordinates per the wrap mode. A level beyond the
    /// pyramid is a caller bug; it saturates to the coarsest level in
    /// release builds.
    ///
    /// * `level` - MIPMap level.
    /// * `s`     - s-index.
    /// * `t`     - t-index.
    pub fn texel(&self, level: usize, s: i32, t: i32) -> T {
        debug_assert!(level < self.levels());
        let level = min(level, self.levels() - 1);
        texel_at(&self.pyramid[level], self.wrap_mode, s, t)
    }

    /// Filters the texture over the elliptical footprint given by the two
    /// differential vectors, dispatching on the configured filtering method.
    /// Non-finite differentials degrade to the finest-level triangle filter.
    ///
    /// * `st`    - The sample point coordinates (s, t).
    /// * `dstdx` - Change in (s, t) with respect to screen x.
    /// * `dstdy` - Change in (s, t) with respect to screen y.
    pub fn lookup(&self, st: &Point2f, dstdx: &Vector2f, dstdy: &Vector2f) -> T {
        if !dstdx.is_finite() || !dstdy.is_finite() {
            return self.triangle(0, st);
        }
        match self.filtering_method {
            FilteringMethod::Trilinear => {
                let width = max(dstdx.abs().max_component(), dstdy.abs().max_component());
                self.lookup_triangle(st, width)
            }
            FilteringMethod::Ewa => self.lookup_ewa(st, *dstdx, *dstdy),
        }
    }

    /// Uses a triangle filter over the texture samples to remove high
    /// frequencies, blending the two pyramid levels that bracket the
    /// isotropic footprint width.
    ///
    /// * `st`    - The sample point coordinates (s, t).
    /// * `width` - Filter width.
    pub fn lookup_triangle(&self, st: &Point2f, width: Float) -> T {
        // Compute MIPMap level for trilinear filtering.
        let levels = self.levels();
        let level = (levels - 1) as Float + max(width, 1e-8).log2();

        // Perform trilinear interpolation at appropriate MIPMap level.
        if level < 0.0 {
            self.triangle(0, st)
        } else if level >= (levels - 1) as Float {
            self.texel(levels - 1, 0, 0)
        } else {
            // Lerp by hand; `lerp` would need a `Float: Mul<T>` bound that
            // the sample algebra does not carry.
            let i_level = level.floor() as usize;
            let delta = level - i_level as Float;
            self.triangle(i_level, st) * (1.0 - delta) + self.triangle(i_level + 1, st) * delta
        }
    }

    /// Uses the EWA filter over the texture samples to remove high
    /// frequencies.
    ///
    /// * `st`   - The sample point coordinates (s, t).
    /// * `dst0` - First elliptical axis.
    /// * `dst1` - Second elliptical axis.
    fn lookup_ewa(&self, st: &Point2f, dst0: Vector2f, dst1: Vector2f) -> T {
        let (dst0, dst1, minor_length) = ellipse_axes(dst0, dst1, self.max_anisotropy);
        if minor_length == 0.0 {
            return self.triangle(0, st);
        }

        // Choose level of detail for EWA lookup and perform EWA filtering.
        let lod = max(0.0, self.levels() as Float - 1.0 + minor_length.log2());
        let i_lod = lod.floor() as usize;
        let delta = lod - i_lod as Float;
        self.ewa(i_lod, st, &dst0, &dst1) * (1.0 - delta)
            + self.ewa(i_lod + 1, st, &dst0, &dst1) * delta
    }

    /// Interpolates using a triangle filter between 4 texels that surround
    /// a given sample point.
    ///
    /// * `level` - The MIPMap level.
    /// * `st`    - The sample point coordinates (s, t).
    fn triangle(&self, level: usize, st: &Point2f) -> T {
        let level = clamp(level, 0, self.levels() - 1);

        let s = st.x * self.pyramid[level].u_size() as Float - 0.5;
        let t = st.y * self.pyramid[level].v_size() as Float - 0.5;

        let s0 = s.floor() as i32;
        let t0 = t.floor() as i32;

        let ds = s - s0 as Float;
        let dt = t - t0 as Float;

        self.texel(level, s0, t0) * (1.0 - ds) * (1.0 - dt)
            + self.texel(level, s0, t0 + 1) * (1.0 - ds) * dt
            + self.texel(level, s0 + 1, t0) * ds * (1.0 - dt)
            + self.texel(level, s0 + 1, t0 + 1) * ds * dt
    }

    /// Evaluates the EWA filter at a single level: every texel inside the
    /// footprint ellipse contributes with a weight that falls off with the
    /// normalized squared radius from the ellipse center.
    ///
    /// * `level` - The MIPMap level.
    /// * `st`    - The sample point coordinates (s, t).
    /// * `dst0`  - Major elliptical axis.
    /// * `dst1`  - Minor elliptical axis.
    fn ewa(&self, level: usize, st: &Point2f, dst0: &Vector2f, dst1: &Vector2f) -> T {
        let levels = self.levels();
        if level >= levels {
            return self.texel(levels - 1, 0, 0);
        }

        let u_size = self.pyramid[level].u_size() as Float;
        let v_size = self.pyramid[level].v_size() as Float;

        // Convert EWA coordinates to appropriate scale for level.
        let st = [st.x * u_size - 0.5, st.y * v_size - 0.5];
        let dst0 = [dst0.x * u_size, dst0.y * v_size];
        let dst1 = [dst1.x * u_size, dst1.y * v_size];

        // Compute ellipse coefficients to bound EWA filter region.
        let mut a = dst0[1] * dst0[1] + dst1[1] * dst1[1] + 1.0;
        let mut b = -2.0 * (dst0[0] * dst0[1] + dst1[0] * dst1[1]);
        let mut c = dst0[0] * dst0[0] + dst1[0] * dst1[0] + 1.0;
        let inv_f = 1.0 / (a * c - b * b * 0.25);
        a *= inv_f;
        b *= inv_f;
        c *= inv_f;

        // Compute the ellipse's (s, t) bounding box in texture space.
        let det = -b * b + 4.0 * a * c;
        let inv_det = 1.0 / det;
        let u_sqrt = (det * c).sqrt();
        let v_sqrt = (a * det).sqrt();
        let s0 = (st[0] - 2.0 * inv_det * u_sqrt).ceil() as i32;
        let s1 = (st[0] + 2.0 * inv_det * u_sqrt).floor() as i32;
        let t0 = (st[1] - 2.0 * inv_det * v_sqrt).ceil() as i32;
        let t1 = (st[1] + 2.0 * inv_det * v_sqrt).floor() as i32;

        // Scan over ellipse bound and compute quadratic equation.
        let mut sum = T::default();
        let mut sum_wts: Float = 0.0;
        for it in t0..=t1 {
            let tt = it as Float - st[1];
            for is in s0..=s1 {
                let ss = is as Float - st[0];
                // Compute squared radius and filter texel if inside ellipse.
                let r2 = a * ss * ss + b * ss * tt + c * tt * tt;
                if r2 < 1.0 {
                    let index = min((r2 * WEIGHT_LUT_SIZE as Float) as usize, WEIGHT_LUT_SIZE - 1);
                    let weight = WEIGHT_LUT[index];
                    sum += self.texel(level, is, it) * weight;
                    sum_wts += weight;
                }
            }
        }
        // The center texel has r2 = 0, so at least one weight accumulated.
        debug_assert!(sum_wts > 0.0);
        sum / sum_wts
    }
}

/// Orders the footprint axes so the major axis comes first and scales the
/// minor axis up when the eccentricity exceeds `max_anisotropy`, bounding
/// the number of texels the filter can touch for near-edge-on footprints.
/// Returns the two axes and the minor axis length.
///
/// * `dst0`           - First elliptical axis.
/// * `dst1`           - Second elliptical axis.
/// * `max_anisotropy` - Largest allowed ratio of major to minor axis length.
fn ellipse_axes(
    dst0: Vector2f,
    dst1: Vector2f,
    max_anisotropy: Float,
) -> (Vector2f, Vector2f, Float) {
    // Compute ellipse minor and major axes.
    let (dst0, mut dst1) = if dst0.length_squared() < dst1.length_squared() {
        (dst1, dst0)
    } else {
        (dst0, dst1)
    };

    let major_length = dst0.length();
    let mut minor_length = dst1.length();

    // Clamp ellipse eccentricity if too large.
    if minor_length * max_anisotropy < major_length && minor_length > 0.0 {
        let scale = major_length / (minor_length * max_anisotropy);
        dst1 *= scale;
        minor_length *= scale;
    }

    (dst0, dst1, minor_length)
}

/// Resolves a possibly out-of-range texel index against an axis of the given
/// size per the wrap mode. `Black` yields `None` so the caller can skip the
/// contribution without touching the buffer.
///
/// * `i`         - The texel index.
/// * `size`      - The axis size.
/// * `wrap_mode` - The image wrap mode.
fn wrap_index(i: i32, size: usize, wrap_mode: ImageWrap) -> Option<usize> {
    let i = match wrap_mode {
        ImageWrap::Repeat => rem(i, size as i32),
        ImageWrap::Clamp => clamp(i, 0, size as i32 - 1),
        ImageWrap::Black => i,
    };
    if i >= 0 && (i as usize) < size {
        Some(i as usize)
    } else {
        None
    }
}

/// Returns the texel at `(s, t)` of a single pyramid level, accounting for
/// boundary conditions.
///
/// * `level`     - The pyramid level data.
/// * `wrap_mode` - The image wrap mode.
/// * `s`         - s-index.
/// * `t`         - t-index.
fn texel_at<T: Texel>(level: &BlockedArray<T>, wrap_mode: ImageWrap, s: i32, t: i32) -> T {
    let ss = wrap_index(s, level.u_size(), wrap_mode);
    let tt = wrap_index(t, level.v_size(), wrap_mode);
    match (ss, tt) {
        (Some(ss), Some(tt)) => level[(ss, tt)],
        _ => T::default(),
    }
}

/// Computes the weights for resampling an axis of `old_res` texels at a new
/// resolution. Every destination texel draws from 4 source texels under a
/// Lanczos window; the 4 weights are normalized to sum to 1.
///
/// * `old_res` - The old resolution.
/// * `new_res` - The new resolution.
fn resample_weights(old_res: usize, new_res: usize) -> Vec<ResampleWeight> {
    assert!(new_res >= old_res);

    let filter_width = 2.0;
    let mut wt = Vec::with_capacity(new_res);
    for i in 0..new_res {
        // Compute image resampling weights for i'th texel.
        let center = (i as Float + 0.5) * old_res as Float / new_res as Float;
        let first_texel = ((center - filter_width) + 0.5).floor() as i32;

        let mut weight = [0.0; 4];
        for (j, w) in weight.iter_mut().enumerate() {
            let pos = (first_texel + j as i32) as Float + 0.5;
            *w = lanczos((pos - center) / filter_width, 2.0);
        }

        // Normalize filter weights for texel resampling.
        let inv_sum_wts = 1.0 / (weight[0] + weight[1] + weight[2] + weight[3]);
        for w in weight.iter_mut() {
            *w *= inv_sum_wts;
        }

        wt.push(ResampleWeight {
            first_texel,
            weight,
        });
    }
    wt
}

/// Resamples the image to the given power-of-two resolution with the
/// separable Lanczos filter, one axis per pass. Each pass runs parallel over
/// destination rows; the pass boundary is a full barrier since the second
/// pass reads the complete output of the first. Both buffers live only for
/// the duration of the build.
///
/// * `img`       - Source image data in row-major order.
/// * `res`       - Source resolution.
/// * `res_pow2`  - Destination power-of-two resolution.
/// * `wrap_mode` - The image wrap mode.
fn resample<T: Texel>(
    img: &[T],
    res: &Point2<usize>,
    res_pow2: &Point2<usize>,
    wrap_mode: ImageWrap,
) -> Vec<T> {
    // Resample image in s direction.
    let s_weights = resample_weights(res.x, res_pow2.x);
    let mut s_zoomed = vec![T::default(); res_pow2.x * res.y];
    s_zoomed
        .par_chunks_mut(res_pow2.x)
        .enumerate()
        .for_each(|(t, row)| {
            // Compute texels (_, t) in s-zoomed image.
            for (s, texel) in row.iter_mut().enumerate() {
                for j in 0..4 {
                    let orig_s = s_weights[s].first_texel + j as i32;
                    if let Some(orig_s) = wrap_index(orig_s, res.x, wrap_mode) {
                        *texel += img[t * res.x + orig_s] * s_weights[s].weight[j];
                    }
                }
            }
        });

    // Resample image in t direction. Iterating destination rows means each
    // row reads 4 complete source rows and needs no per-thread scratch.
    let t_weights = resample_weights(res.y, res_pow2.y);
    let mut resampled_image = vec![T::default(); res_pow2.x * res_pow2.y];
    resampled_image
        .par_chunks_mut(res_pow2.x)
        .enumerate()
        .for_each(|(t, row)| {
            for j in 0..4 {
                let orig_t = t_weights[t].first_texel + j as i32;
                if let Some(orig_t) = wrap_index(orig_t, res.y, wrap_mode) {
                    let weight = t_weights[t].weight[j];
                    let src = &s_zoomed[orig_t * res_pow2.x..(orig_t + 1) * res_pow2.x];
                    for (texel, v) in row.iter_mut().zip(src.iter()) {
                        *texel += *v * weight;
                    }
                }
            }
            // Clamp out ringing from the negative filter lobes.
            for texel in row.iter_mut() {
                *texel = texel.clamp_default();
            }
        });

    resampled_image
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    fn gradient_image(width: usize, height: usize) -> Vec<Float> {
        (0..width * height).map(|i| i as Float).collect()
    }

    fn build(
        width: usize,
        height: usize,
        img: &[Float],
        method: FilteringMethod,
        wrap: ImageWrap,
    ) -> MIPMap<Float> {
        MIPMap::new(&Point2::new(width, height), img, method, wrap, 8.0).unwrap()
    }

    #[test]
    fn power_of_two_image_is_not_resampled() {
        let img = gradient_image(8, 4);
        let mm = build(8, 4, &img, FilteringMethod::Trilinear, ImageWrap::Repeat);
        assert_eq!(mm.width(), 8);
        assert_eq!(mm.height(), 4);
        for t in 0..4 {
            for s in 0..8 {
                assert_eq!(mm.texel(0, s as i32, t as i32), img[t * 8 + s]);
            }
        }
    }

    #[test]
    fn pyramid_levels_halve_down_to_one_texel() {
        let img = gradient_image(20, 10);
        let mm = build(20, 10, &img, FilteringMethod::Trilinear, ImageWrap::Repeat);
        assert_eq!(mm.width(), 32);
        assert_eq!(mm.height(), 16);
        assert_eq!(mm.levels(), 6);

        let (mut w, mut h) = (32, 16);
        for level in 1..mm.levels() {
            w = max(1, w / 2);
            h = max(1, h / 2);
            assert_eq!(mm.pyramid[level].u_size(), w);
            assert_eq!(mm.pyramid[level].v_size(), h);
        }
        assert_eq!(mm.pyramid[mm.levels() - 1].u_size(), 1);
        assert_eq!(mm.pyramid[mm.levels() - 1].v_size(), 1);
    }

    #[test]
    fn texel_accessor_applies_wrap_modes() {
        let img = gradient_image(4, 4);
        let repeat = build(4, 4, &img, FilteringMethod::Trilinear, ImageWrap::Repeat);
        let clamped = build(4, 4, &img, FilteringMethod::Trilinear, ImageWrap::Clamp);
        let black = build(4, 4, &img, FilteringMethod::Trilinear, ImageWrap::Black);

        assert_eq!(repeat.texel(0, -1, 0), img[3]);
        assert_eq!(repeat.texel(0, 4, 2), img[2 * 4]);
        assert_eq!(clamped.texel(0, -1, 0), img[0]);
        assert_eq!(clamped.texel(0, 7, 3), img[3 * 4 + 3]);
        assert_eq!(black.texel(0, -1, 0), 0.0);
        assert_eq!(black.texel(0, 2, 5), 0.0);
        assert_eq!(black.texel(0, 1, 1), img[4 + 1]);
    }

    #[test]
    fn resampling_preserves_constant_images() {
        let img = vec![0.4; 20 * 10];
        let mm = build(20, 10, &img, FilteringMethod::Trilinear, ImageWrap::Repeat);
        for t in 0..16 {
            for s in 0..32 {
                assert!(approx_eq!(Float, mm.texel(0, s, t), 0.4, epsilon = 1e-4));
            }
        }
    }

    #[test]
    fn constant_image_lookups_return_the_constant() {
        let v: Float = 0.7;
        let img = vec![v; 16];
        for wrap in [ImageWrap::Repeat, ImageWrap::Clamp, ImageWrap::Black] {
            for method in [FilteringMethod::Trilinear, FilteringMethod::Ewa] {
                let mm = MIPMap::new(&Point2::new(4, 4), &img, method, wrap, 8.0).unwrap();
                // Interior samples so the result is wrap-independent.
                for (st, d0, d1) in [
                    (
                        Point2f::new(0.5, 0.5),
                        Vector2f::new(0.2, 0.0),
                        Vector2f::new(0.0, 0.1),
                    ),
                    (
                        Point2f::new(0.5, 0.25),
                        Vector2f::new(0.05, 0.0),
                        Vector2f::new(0.0, 0.05),
                    ),
                    (Point2f::new(0.5, 0.5), Vector2f::zero(), Vector2f::zero()),
                ] {
                    let got = mm.lookup(&st, &d0, &d1);
                    assert!(
                        approx_eq!(Float, got, v, epsilon = 1e-4),
                        "wrap={wrap:?} method={method:?} st={st:?} got={got}"
                    );
                }
            }
        }
    }

    #[test]
    fn full_footprint_lookup_averages_checkerboard() {
        let (a, b) = (1.0, 3.0);
        let img = vec![a, b, b, a];
        let mm = build(2, 2, &img, FilteringMethod::Trilinear, ImageWrap::Repeat);
        for st in [Point2f::new(0.5, 0.5), Point2f::new(0.1, 0.8)] {
            let got = mm.lookup_triangle(&st, 1.0);
            assert!(approx_eq!(Float, got, (a + b) / 2.0, epsilon = 1e-5));
        }
    }

    #[test]
    fn zero_dimension_image_is_rejected() {
        let err = MIPMap::<Float>::new(
            &Point2::new(0, 4),
            &[],
            FilteringMethod::Trilinear,
            ImageWrap::Repeat,
            8.0,
        )
        .unwrap_err();
        assert_eq!(err, MIPMapError::InvalidImageDimensions(0, 4));
    }

    #[test]
    fn short_texel_buffer_is_rejected() {
        let err = MIPMap::<Float>::new(
            &Point2::new(2, 2),
            &[1.0; 3],
            FilteringMethod::Trilinear,
            ImageWrap::Repeat,
            8.0,
        )
        .unwrap_err();
        assert_eq!(
            err,
            MIPMapError::TexelBufferSize {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn non_finite_differentials_degrade_to_finest_level() {
        let img = gradient_image(8, 8);
        let mm = build(8, 8, &img, FilteringMethod::Ewa, ImageWrap::Clamp);
        let st = Point2f::new(0.3, 0.6);
        let expected = mm.lookup_triangle(&st, 0.0);

        let nan = Vector2f::new(Float::NAN, 0.0);
        let inf = Vector2f::new(0.0, Float::INFINITY);
        let ok = Vector2f::new(0.1, 0.0);
        assert_eq!(mm.lookup(&st, &nan, &ok), expected);
        assert_eq!(mm.lookup(&st, &ok, &inf), expected);
    }

    #[test]
    fn degenerate_ellipse_falls_back_to_bilinear() {
        let img = gradient_image(8, 8);
        let mm = build(8, 8, &img, FilteringMethod::Ewa, ImageWrap::Repeat);
        let st = Point2f::new(0.4, 0.2);
        let got = mm.lookup(&st, &Vector2f::new(0.25, 0.0), &Vector2f::zero());
        assert_eq!(got, mm.lookup_triangle(&st, 0.0));
    }

    #[test]
    fn spectrum_pyramid_averages_channels_independently() {
        let img = vec![
            RGBSpectrum::from_rgb(&[1.0, 0.0, 0.0]),
            RGBSpectrum::from_rgb(&[0.0, 1.0, 0.0]),
            RGBSpectrum::from_rgb(&[0.0, 0.0, 1.0]),
            RGBSpectrum::from_rgb(&[1.0, 1.0, 1.0]),
        ];
        let mm = MIPMap::new(
            &Point2::new(2, 2),
            &img,
            FilteringMethod::Ewa,
            ImageWrap::Repeat,
            8.0,
        )
        .unwrap();
        assert_eq!(mm.levels(), 2);
        assert_eq!(mm.texel(1, 0, 0), RGBSpectrum::from_rgb(&[0.5, 0.5, 0.5]));
    }

    #[test]
    fn weight_table_is_positive_and_decreasing() {
        assert!(WEIGHT_LUT[0] > 0.8);
        for i in 1..WEIGHT_LUT_SIZE {
            assert!(WEIGHT_LUT[i] <= WEIGHT_LUT[i - 1]);
            assert!(WEIGHT_LUT[i] >= 0.0);
        }
        // Falls to zero at the ellipse boundary, so there is no hard cutoff.
        assert!(WEIGHT_LUT[WEIGHT_LUT_SIZE - 1].abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn resample_weights_are_normalized(old_res in 1usize..500) {
            let new_res = old_res.next_power_of_two();
            for rw in resample_weights(old_res, new_res) {
                let sum: Float = rw.weight.iter().sum();
                prop_assert!(approx_eq!(Float, sum, 1.0, epsilon = 1e-5));
            }
        }

        #[test]
        fn zero_width_lookup_is_bilinear_at_finest_level(
            sx in 0.0..1.0f32,
            sy in 0.0..1.0f32,
        ) {
            let img = gradient_image(8, 8);
            let mm = build(8, 8, &img, FilteringMethod::Trilinear, ImageWrap::Clamp);
            let st = Point2f::new(sx, sy);
            let got = mm.lookup_triangle(&st, 0.0);

            let s = sx * 8.0 - 0.5;
            let t = sy * 8.0 - 0.5;
            let (s0, t0) = (s.floor() as i32, t.floor() as i32);
            let (ds, dt) = (s - s0 as Float, t - t0 as Float);
            let expected = mm.texel(0, s0, t0) * (1.0 - ds) * (1.0 - dt)
                + mm.texel(0, s0, t0 + 1) * (1.0 - ds) * dt
                + mm.texel(0, s0 + 1, t0) * ds * (1.0 - dt)
                + mm.texel(0, s0 + 1, t0 + 1) * ds * dt;
            prop_assert!(approx_eq!(Float, got, expected, epsilon = 1e-4));
        }

        #[test]
        fn huge_width_lookup_returns_coarsest_texel(
            sx in 0.0..1.0f32,
            sy in 0.0..1.0f32,
        ) {
            let img = gradient_image(8, 8);
            let mm = build(8, 8, &img, FilteringMethod::Trilinear, ImageWrap::Repeat);
            let coarsest = mm.texel(mm.levels() - 1, 0, 0);
            let got = mm.lookup_triangle(&Point2f::new(sx, sy), 1.0e6);
            prop_assert!(approx_eq!(Float, got, coarsest, epsilon = 1e-5));
        }

        #[test]
        fn ewa_lookup_stays_finite_for_arbitrary_footprints(
            sx in 0.0..1.0f32,
            sy in 0.0..1.0f32,
            dx0 in -2.0..2.0f32,
            dy0 in -2.0..2.0f32,
            dx1 in -2.0..2.0f32,
            dy1 in -2.0..2.0f32,
        ) {
            let img = gradient_image(16, 16);
            let mm = build(16, 16, &img, FilteringMethod::Ewa, ImageWrap::Repeat);
            let v = mm.lookup(
                &Point2f::new(sx, sy),
                &Vector2f::new(dx0, dy0),
                &Vector2f::new(dx1, dy1),
            );
            prop_assert!(v.is_finite());
        }

        #[test]
        fn eccentricity_is_clamped(
            dx0 in -4.0..4.0f32,
            dy0 in -4.0..4.0f32,
            dx1 in -4.0..4.0f32,
            dy1 in -4.0..4.0f32,
            max_aniso in 1.0..16.0f32,
        ) {
            let (major, minor, minor_length) =
                ellipse_axes(Vector2f::new(dx0, dy0), Vector2f::new(dx1, dy1), max_aniso);
            prop_assume!(minor_length > 0.0);
            prop_assert!(major.length() / minor_length <= max_aniso + 1e-3);
            prop_assert!(approx_eq!(Float, minor.length(), minor_length, epsilon = 1e-3));
            prop_assert!(major.length() >= minor.length() - 1e-6);
        }
    }
}
