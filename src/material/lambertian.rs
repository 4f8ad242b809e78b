use crate::foundation::core::{Color, color_from_hex};
use crate::foundation::math::{SampleRng, near_zero, random_unit_vector};
use crate::geometry::hit::Hit;
use crate::geometry::ray::Ray;
use crate::material::{Material, Scatter};

/// Ideal diffuse reflector.
#[derive(Clone, Debug)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Diffuse material with per-channel reflectance `albedo`.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    /// Diffuse material from a packed `0xRRGGBB` color.
    pub fn from_hex(rgb: u32) -> Self {
        Self::new(color_from_hex(rgb))
    }

    /// Per-channel reflectance.
    pub fn albedo(&self) -> &Color {
        &self.albedo
    }
}

impl Material for Lambertian {
    fn scatter(&self, _ray: &Ray, hit: &Hit<'_>, rng: &mut SampleRng) -> Scatter {
        let mut direction = hit.normal + random_unit_vector(rng);
        if near_zero(&direction) {
            direction = hit.normal;
        }
        Scatter::Bounce {
            attenuation: self.albedo,
            ray: Ray::new(hit.position, direction),
        }
    }
}
