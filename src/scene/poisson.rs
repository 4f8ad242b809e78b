//! Seeded Poisson-disk layouts of glass spheres on the ground plane.

use std::f64::consts::TAU;

use nalgebra::Vector2;
use rand::{Rng, SeedableRng};

use crate::camera::Camera;
use crate::foundation::core::Vec3;
use crate::foundation::error::{RayframeError, RayframeResult};
use crate::foundation::math::SampleRng;
use crate::geometry::sphere::Sphere;
use crate::material::{Dielectric, Lambertian};
use crate::scene::Scene;

/// Minimum distance between two sphere centers on the ground plane.
pub const MIN_SPACING: f64 = 3.0;
/// Upper bound on shapes in a generated scene, ground included.
pub const MAX_SHAPES: usize = 40;

const ATTEMPTS: u32 = 10;
const SPACING_EPSILON: f64 = 0.01;
const SPHERE_RADIUS: f64 = 0.5;
const SEED_POINTS: [(f64, f64); 2] = [(0.0, 5.0), (0.0, 0.0)];

/// A generated scene and where its spheres ended up.
pub struct GeneratedScene {
    /// Ground sphere first, then one sphere per entry of `centers`.
    pub scene: Scene,
    /// Index into `scene` of the highlighted sphere (never the ground).
    pub target: usize,
    /// Sphere centers in placement order.
    pub centers: Vec<Vec3>,
}

impl GeneratedScene {
    /// Camera above and in front of the layout, looking down at its middle.
    pub fn overview_camera(&self, aspect: f64) -> RayframeResult<Camera> {
        Camera::look_at(
            Vec3::new(0.0, 8.0, 22.0),
            Vec3::new(0.0, 0.0, 2.5),
            Vec3::new(0.0, 1.0, 0.0),
            50.0,
            aspect,
        )
    }
}

impl std::fmt::Debug for GeneratedScene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedScene")
            .field("objects", &self.scene.len())
            .field("target", &self.target)
            .finish()
    }
}

/// Scatter up to `MAX_SHAPES - 1` glass spheres over the ground with Poisson-disk spacing.
///
/// The same `seed` always yields the same layout and target.
pub fn generated_scene(seed: u64) -> RayframeResult<GeneratedScene> {
    let mut rng = SampleRng::seed_from_u64(seed);
    let mut points: Vec<Vector2<f64>> =
        SEED_POINTS.iter().map(|&(x, z)| Vector2::new(x, z)).collect();
    let mut centers = Vec::new();

    let mut active = 0;
    while active < points.len() && centers.len() + 1 < MAX_SHAPES {
        match next_point(&points, &points[active], &mut rng) {
            Some(p) => {
                centers.push(Vec3::new(p.x, 0.0, p.y));
                points.push(p);
            }
            None => active += 1,
        }
    }
    if centers.is_empty() {
        return Err(RayframeError::scene("poisson layout placed no spheres"));
    }

    let target = rng.gen_range(1..=centers.len());
    let mut scene = Scene::new();
    scene.push(Sphere::new(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        Box::new(Lambertian::from_hex(0x007070)),
    )?);
    for (i, center) in centers.iter().enumerate() {
        let glass = if i + 1 == target {
            Dielectric::new(Vec3::new(1.0, 0.6, 0.6), 1.05)
        } else {
            Dielectric::new(Vec3::new(0.0, 0.6, 1.0), 1.5)
        };
        scene.push(Sphere::new(*center, SPHERE_RADIUS, Box::new(glass))?);
    }

    Ok(GeneratedScene {
        scene,
        target,
        centers,
    })
}

/// First candidate on the ring around `near` that keeps clear of every existing point.
///
/// Candidates are evenly spaced around the ring, starting from a random angle.
fn next_point(
    existing: &[Vector2<f64>],
    near: &Vector2<f64>,
    rng: &mut SampleRng,
) -> Option<Vector2<f64>> {
    let ring = MIN_SPACING + SPACING_EPSILON;
    let offset: f64 = rng.gen_range(0.0..1.0);
    (0..ATTEMPTS)
        .map(|attempt| {
            let theta = TAU * (offset + f64::from(attempt) / f64::from(ATTEMPTS));
            near + Vector2::new(theta.cos(), theta.sin()) * ring
        })
        .find(|candidate| existing.iter().all(|p| (p - candidate).norm() >= MIN_SPACING))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/poisson.rs"]
mod tests;
