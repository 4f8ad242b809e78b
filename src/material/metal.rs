use crate::foundation::core::Color;
use crate::foundation::math::{SampleRng, random_in_unit_sphere, reflect};
use crate::geometry::hit::Hit;
use crate::geometry::ray::Ray;
use crate::material::{Material, Scatter};

/// Specular reflector with optional roughness.
#[derive(Clone, Debug)]
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Metal with reflectance `albedo` and roughness `fuzz`, clamped to `[0, 1]`.
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        let fuzz = if fuzz.is_finite() {
            fuzz.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { albedo, fuzz }
    }

    /// Roughness in `[0, 1]`.
    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(&self, ray: &Ray, hit: &Hit<'_>, rng: &mut SampleRng) -> Scatter {
        let reflected = reflect(&ray.direction().normalize(), &hit.normal);
        let direction = if self.fuzz > 0.0 {
            reflected + self.fuzz * random_in_unit_sphere(rng)
        } else {
            reflected
        };
        if direction.dot(&hit.normal) <= 0.0 {
            return Scatter::Absorbed;
        }
        Scatter::Bounce {
            attenuation: self.albedo,
            ray: Ray::new(hit.position, direction),
        }
    }
}
