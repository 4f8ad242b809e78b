use std::path::Path;

use image::RgbImage;

use crate::foundation::core::Color;
use crate::foundation::error::{RayframeError, RayframeResult};
use crate::foundation::math::SampleRng;
use crate::geometry::hit::Hit;
use crate::geometry::ray::Ray;
use crate::material::{Material, Scatter};

/// Image-mapped surface that emits its texel color.
///
/// Texels are decoded with gamma 2 so that the output gamma step reproduces the source image.
#[derive(Clone, Debug)]
pub struct Texture {
    image: RgbImage,
    scale: f64,
}

impl Texture {
    /// Wrap an already decoded image. `scale` repeats the image `scale` times across the surface.
    pub fn from_image(image: impl Into<RgbImage>, scale: f64) -> RayframeResult<Self> {
        let image = image.into();
        if image.width() == 0 || image.height() == 0 {
            return Err(RayframeError::scene("texture image must be non-empty"));
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(RayframeError::scene(format!(
                "texture scale must be finite and > 0, got {scale}"
            )));
        }
        Ok(Self { image, scale })
    }

    /// Decode an image file from disk.
    pub fn load(path: &Path, scale: f64) -> RayframeResult<Self> {
        let img = image::open(path).map_err(|e| {
            RayframeError::scene(format!("load texture '{}': {e}", path.display()))
        })?;
        Self::from_image(img.to_rgb8(), scale)
    }

    /// Texel index for coordinate `val` along an axis of `bound` texels, wrapping negatives.
    fn wrap(&self, val: f64, bound: u32) -> u32 {
        let coord = (val * self.scale * f64::from(bound)).floor() as i64;
        coord.rem_euclid(i64::from(bound)) as u32
    }

    /// Linear color at texture coordinates `(u, v)`; `v == 0` is the bottom row of the image.
    pub fn sample(&self, u: f64, v: f64) -> Color {
        let x = self.wrap(u, self.image.width());
        let y = self.wrap(1.0 - v, self.image.height());
        let px = self.image.get_pixel(x, y);
        Color::new(
            f64::from(px[0]) / 255.0,
            f64::from(px[1]) / 255.0,
            f64::from(px[2]) / 255.0,
        )
        .map(|c| c * c)
    }
}

impl Material for Texture {
    fn scatter(&self, _ray: &Ray, hit: &Hit<'_>, _rng: &mut SampleRng) -> Scatter {
        Scatter::Emit(self.sample(hit.uv.x, hit.uv.y))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/material/texture.rs"]
mod tests;
