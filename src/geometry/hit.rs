use nalgebra::Vector2;

use crate::foundation::core::Vec3;
use crate::geometry::ray::Ray;
use crate::geometry::shape::Shape;
use crate::material::Material;

/// Ray/surface intersection record.
#[derive(Clone, Copy)]
pub struct Hit<'a> {
    /// Ray parameter of the intersection.
    pub distance: f64,
    /// World-space intersection point.
    pub position: Vec3,
    /// Unit normal, always facing against the incoming ray.
    pub normal: Vec3,
    /// `true` when the ray hit the outside of the surface.
    pub front_face: bool,
    /// Surface texture coordinates in `[0, 1]^2`.
    pub uv: Vector2<f64>,
    pub(crate) shape: &'a dyn Shape,
}

impl<'a> Hit<'a> {
    /// Build a hit from the geometric outward normal, orienting it against `ray`.
    pub fn new(
        ray: &Ray,
        distance: f64,
        outward_normal: Vec3,
        uv: Vector2<f64>,
        shape: &'a dyn Shape,
    ) -> Self {
        let front_face = ray.direction().dot(&outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        Self {
            distance,
            position: ray.at(distance),
            normal,
            front_face,
            uv,
            shape,
        }
    }

    /// Material of the surface that was hit.
    pub fn material(&self) -> &'a dyn Material {
        self.shape.material()
    }
}

impl std::fmt::Debug for Hit<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hit")
            .field("distance", &self.distance)
            .field("position", &self.position)
            .field("normal", &self.normal)
            .field("front_face", &self.front_face)
            .field("uv", &self.uv)
            .finish_non_exhaustive()
    }
}
