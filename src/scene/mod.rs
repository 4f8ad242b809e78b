//! Scene graph: the list of shapes a ray is tested against.

mod demo;
mod description;
mod poisson;

pub use demo::demo_scene;
pub use poisson::{GeneratedScene, MAX_SHAPES, MIN_SPACING, generated_scene};
pub use description::{
    BuiltScene, CameraDef, ColorDef, MaterialDef, ObjectDef, RenderDef, SceneDef, SphereDef,
};

use crate::geometry::hit::Hit;
use crate::geometry::ray::{Ray, T_MAX, T_MIN};
use crate::geometry::shape::Shape;

/// Owned collection of shapes.
#[derive(Default)]
pub struct Scene {
    objects: Vec<Box<dyn Shape>>,
}

impl Scene {
    /// Empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape.
    pub fn push(&mut self, shape: impl Shape + 'static) {
        self.objects.push(Box::new(shape));
    }

    /// Append an already boxed shape.
    pub fn push_boxed(&mut self, shape: Box<dyn Shape>) {
        self.objects.push(shape);
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Return `true` when the scene has no shapes.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Nearest hit along `ray` within `[T_MIN, T_MAX]`. Ties keep the earlier shape.
    pub fn closest_hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut closest: Option<Hit<'_>> = None;
        for shape in &self.objects {
            let t_max = closest.as_ref().map_or(T_MAX, |h| h.distance);
            if let Some(hit) = shape.intersect(ray, T_MIN, t_max) {
                closest = Some(hit);
            }
        }
        closest
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("objects", &self.objects.len())
            .finish()
    }
}

impl FromIterator<Box<dyn Shape>> for Scene {
    fn from_iter<I: IntoIterator<Item = Box<dyn Shape>>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/closest_hit.rs"]
mod tests;
