//! Surface materials.
//!
//! A material decides what happens to a path when it hits a surface: continue in a new direction
//! with some attenuation, stop with a fixed color, or get absorbed.

mod dielectric;
mod lambertian;
mod metal;
mod texture;

pub use dielectric::Dielectric;
pub use lambertian::Lambertian;
pub use metal::Metal;
pub use texture::Texture;

use crate::foundation::core::Color;
use crate::foundation::math::SampleRng;
use crate::geometry::hit::Hit;
use crate::geometry::ray::Ray;

/// Outcome of a ray hitting a material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scatter {
    /// Continue along `ray`; the traced color is multiplied by `attenuation`.
    Bounce {
        /// Per-channel reflectance.
        attenuation: Color,
        /// Scattered ray, starting at the hit point.
        ray: Ray,
    },
    /// Terminate the path with a fixed color.
    Emit(Color),
    /// Terminate the path with black.
    Absorbed,
}

/// Surface response to an incoming ray.
pub trait Material: Send + Sync {
    /// Decide how `ray` continues after hitting the surface at `hit`.
    fn scatter(&self, ray: &Ray, hit: &Hit<'_>, rng: &mut SampleRng) -> Scatter;
}

#[cfg(test)]
#[path = "../../tests/unit/material/scatter.rs"]
mod tests;
