use rand::Rng;

use crate::foundation::core::Color;
use crate::foundation::math::{SampleRng, reflect, refract, schlick};
use crate::geometry::hit::Hit;
use crate::geometry::ray::Ray;
use crate::material::{Material, Scatter};

/// Transparent refractive material (glass, water).
#[derive(Clone, Debug)]
pub struct Dielectric {
    albedo: Color,
    refraction_index: f64,
}

impl Dielectric {
    /// Dielectric with tint `albedo` and index of refraction `refraction_index`.
    pub fn new(albedo: Color, refraction_index: f64) -> Self {
        Self {
            albedo,
            refraction_index,
        }
    }

    /// Clear dielectric.
    pub fn clear(refraction_index: f64) -> Self {
        Self::new(Color::new(1.0, 1.0, 1.0), refraction_index)
    }

    /// Index of refraction.
    pub fn refraction_index(&self) -> f64 {
        self.refraction_index
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray: &Ray, hit: &Hit<'_>, rng: &mut SampleRng) -> Scatter {
        let eta_ratio = if hit.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };
        let unit = ray.direction().normalize();
        let cos_theta = (-unit).dot(&hit.normal).min(1.0);

        let direction = match refract(&unit, &hit.normal, eta_ratio) {
            Some(refracted) if schlick(cos_theta, eta_ratio) <= rng.gen_range(0.0..1.0) => {
                refracted
            }
            _ => reflect(&unit, &hit.normal),
        };

        Scatter::Bounce {
            attenuation: self.albedo,
            ray: Ray::new(hit.position, direction),
        }
    }
}
