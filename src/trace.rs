use crate::foundation::core::Color;
use crate::foundation::math::SampleRng;
use crate::geometry::ray::Ray;
use crate::material::Scatter;
use crate::scene::Scene;

/// Default maximum number of bounces per path.
pub const DEFAULT_MAX_DEPTH: u32 = 50;

/// Vertical white-to-blue gradient seen by rays that escape the scene.
pub fn sky_color(ray: &Ray) -> Color {
    let t = 0.5 * (ray.direction().normalize().y + 1.0);
    Color::new(1.0, 1.0, 1.0) * (1.0 - t) + Color::new(0.5, 0.7, 1.0) * t
}

/// Radiance carried back along `ray`, following at most `depth` bounces.
///
/// An exhausted depth budget returns the sky color.
pub fn trace(ray: &Ray, scene: &Scene, depth: u32, rng: &mut SampleRng) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::new(1.0, 1.0, 1.0);
    let mut remaining = depth;

    loop {
        if remaining == 0 {
            return throughput.component_mul(&sky_color(&ray));
        }
        let Some(hit) = scene.closest_hit(&ray) else {
            return throughput.component_mul(&sky_color(&ray));
        };
        match hit.material().scatter(&ray, &hit, rng) {
            Scatter::Bounce {
                attenuation,
                ray: next,
            } => {
                throughput = throughput.component_mul(&attenuation);
                ray = next;
                remaining -= 1;
            }
            Scatter::Emit(color) => return throughput.component_mul(&color),
            Scatter::Absorbed => return Color::zeros(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/trace.rs"]
mod tests;
