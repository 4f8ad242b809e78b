use std::f64::consts::{PI, TAU};

use nalgebra::Vector2;

use crate::foundation::core::Vec3;
use crate::foundation::error::{RayframeError, RayframeResult};
use crate::geometry::hit::Hit;
use crate::geometry::ray::Ray;
use crate::geometry::shape::Shape;
use crate::material::Material;

/// Sphere with an owned material.
pub struct Sphere {
    center: Vec3,
    radius: f64,
    material: Box<dyn Material>,
}

impl Sphere {
    /// Create a sphere; the radius must be finite and positive.
    pub fn new(center: Vec3, radius: f64, material: Box<dyn Material>) -> RayframeResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(RayframeError::scene(format!(
                "sphere radius must be finite and > 0, got {radius}"
            )));
        }
        if !center.iter().all(|c| c.is_finite()) {
            return Err(RayframeError::scene("sphere center must be finite"));
        }
        Ok(Self {
            center,
            radius,
            material,
        })
    }

    /// Sphere center.
    pub fn center(&self) -> &Vec3 {
        &self.center
    }

    /// Sphere radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    fn texture_coords(unit_normal: &Vec3) -> Vector2<f64> {
        let theta = (-unit_normal.y).clamp(-1.0, 1.0).acos();
        let phi = (-unit_normal.z).atan2(unit_normal.x) + PI;
        Vector2::new(phi / TAU, theta / PI)
    }
}

impl Shape for Sphere {
    fn intersect(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<Hit<'_>> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().norm_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.norm_squared() - self.radius * self.radius;
        let discriminant = half_b * half_b - a * c;
        if discriminant <= 0.0 || a == 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let near = (-half_b - root) / a;
        let far = (-half_b + root) / a;
        let t = [near, far]
            .into_iter()
            .find(|t| *t > t_min && *t < t_max)?;

        let outward = (ray.at(t) - self.center) / self.radius;
        Some(Hit::new(
            ray,
            t,
            outward,
            Self::texture_coords(&outward),
            self,
        ))
    }

    fn material(&self) -> &dyn Material {
        self.material.as_ref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/sphere.rs"]
mod tests;
