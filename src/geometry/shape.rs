use crate::geometry::hit::Hit;
use crate::geometry::ray::Ray;
use crate::material::Material;

/// A surface that can be intersected by rays.
pub trait Shape: Send + Sync {
    /// Nearest intersection with parameter strictly inside `(t_min, t_max)`.
    fn intersect(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<Hit<'_>>;

    /// Surface material.
    fn material(&self) -> &dyn Material;
}
