//! Image Texture

use core::geometry::*;
use core::mipmap::*;
use core::pbrt::*;
use core::spectrum::*;
use core::texture::*;
use std::sync::Arc;

/// Decoded image as delivered by the loader collaborator: RGB texels in
/// row-major order with (0, 0) at the upper left corner.
#[derive(Clone)]
pub struct RGBImage {
    /// The texels.
    pub pixels: Vec<RGBSpectrum>,

    /// Image resolution.
    pub resolution: Point2<usize>,
}

/// Stores an image texture with MIPMaps using texels of type `Tmemory`.
#[derive(Clone)]
pub struct ImageTexture<Tmemory: Texel> {
    /// 2D mapping.
    mapping: ArcTextureMapping2D,

    /// The mipmaps.
    mipmap: ArcMIPMap<Tmemory>,
}

impl<Tmemory: Texel> ImageTexture<Tmemory>
where
    RGBSpectrum: ConvertIn<Tmemory>,
{
    /// Create a new `ImageTexture<Tmemory>`. When the loader signals absence,
    /// or delivers an image the pyramid cannot be built from, a 1x1 constant
    /// grey texture is substituted so rendering can proceed.
    ///
    /// * `mapping` - The 2D mapping.
    /// * `image`   - Decoded image data, if the loader found any.
    /// * `info`    - Filtering configuration.
    pub fn new(mapping: ArcTextureMapping2D, image: Option<RGBImage>, info: &TexInfo) -> Self {
        let mipmap = match image {
            Some(img) => Self::generate_mipmap(img, info).unwrap_or_else(|err| {
                warn!("Unable to build MIPMap: {err}. Creating a constant grey texture.");
                Self::fallback_mipmap(info)
            }),
            None => {
                warn!("No image data. Creating a constant grey texture.");
                Self::fallback_mipmap(info)
            }
        };
        Self { mapping, mipmap }
    }

    /// Convert the loader texels to type `Tmemory` and build the `MIPMap`.
    ///
    /// * `img`  - Decoded image data.
    /// * `info` - Filtering configuration.
    fn generate_mipmap(img: RGBImage, info: &TexInfo) -> Result<ArcMIPMap<Tmemory>, MIPMapError> {
        let RGBImage {
            pixels: mut texels,
            resolution,
        } = img;

        // Flip image in y; texture coordinate space has (0, 0) at the lower
        // left corner.
        for y in 0..resolution.y / 2 {
            for x in 0..resolution.x {
                let o1 = y * resolution.x + x;
                let o2 = (resolution.y - 1 - y) * resolution.x + x;
                texels.swap(o1, o2);
            }
        }

        // Convert texels to type `Tmemory` and create MIPMap.
        let converted: Vec<Tmemory> = texels
            .iter()
            .map(|texel| texel.convert_in(info.scale, info.gamma))
            .collect();

        let mipmap = MIPMap::new(
            &resolution,
            &converted,
            info.filtering_method,
            info.wrap_mode,
            info.max_anisotropy,
        )?;
        Ok(Arc::new(mipmap))
    }

    /// Builds the one-valued replacement MIPMap.
    ///
    /// * `info` - Filtering configuration.
    fn fallback_mipmap(info: &TexInfo) -> ArcMIPMap<Tmemory> {
        let grey = RGBSpectrum::new(0.5).convert_in(info.scale, info.gamma);
        let mipmap = MIPMap::new(
            &Point2::new(1, 1),
            &[grey],
            info.filtering_method,
            info.wrap_mode,
            info.max_anisotropy,
        )
        .expect("a 1x1 constant image is always valid");
        Arc::new(mipmap)
    }
}

/// Implement `ImageTexture` stored in MIPMaps as `RGBSpectrum` and evaluate
/// to `Spectrum`.
impl Texture<Spectrum> for ImageTexture<RGBSpectrum> {
    /// Evaluate the texture at a surface point.
    ///
    /// * `uv`  - Surface (u, v) parametric coordinates.
    /// * `der` - Screen-space derivatives of the (u, v) coordinates.
    fn evaluate(&self, uv: &Point2f, der: &Derivatives) -> Spectrum {
        // Get the (s, t) mapping for the point.
        let TextureMap2DResult {
            p: st,
            dstdx,
            dstdy,
        } = self.mapping.map(uv, der);

        self.mipmap.lookup(&st, &dstdx, &dstdy)
    }
}

/// Implement `ImageTexture` stored in MIPMaps as `Float` and evaluate to
/// `Float`.
impl Texture<Float> for ImageTexture<Float> {
    /// Evaluate the texture at a surface point.
    ///
    /// * `uv`  - Surface (u, v) parametric coordinates.
    /// * `der` - Screen-space derivatives of the (u, v) coordinates.
    fn evaluate(&self, uv: &Point2f, der: &Derivatives) -> Float {
        let TextureMap2DResult {
            p: st,
            dstdx,
            dstdy,
        } = self.mapping.map(uv, der);

        self.mipmap.lookup(&st, &dstdx, &dstdy)
    }
}
