use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};

use crate::foundation::core::Vec3;

/// Random number generator used for every Monte-Carlo decision.
pub type SampleRng = rand::rngs::SmallRng;

/// SplitMix64 finalizer.
pub(crate) fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Derive an independent RNG for one pixel sample stream.
///
/// The stream depends only on its inputs, never on scheduling order.
pub(crate) fn pixel_rng(seed: u64, x: u32, y: u32, pass: u64) -> SampleRng {
    let mut h = mix64(seed);
    h = mix64(h ^ ((u64::from(x) << 32) | u64::from(y)));
    h = mix64(h ^ pass);
    SampleRng::seed_from_u64(h)
}

/// Uniformly distributed point on the unit sphere.
pub(crate) fn random_unit_vector(rng: &mut SampleRng) -> Vec3 {
    let a = rng.gen_range(0.0..TAU);
    let z: f64 = rng.gen_range(-1.0..1.0);
    let r = (1.0 - z * z).sqrt();
    Vec3::new(r * a.cos(), r * a.sin(), z)
}

/// Uniformly distributed point inside the unit sphere (rejection sampling).
pub(crate) fn random_in_unit_sphere(rng: &mut SampleRng) -> Vec3 {
    loop {
        let p = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if p.norm_squared() < 1.0 {
            return p;
        }
    }
}

/// Mirror `v` around `n`.
pub(crate) fn reflect(v: &Vec3, n: &Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract unit vector `uv` through a surface with normal `n`.
///
/// Returns `None` on total internal reflection.
pub(crate) fn refract(uv: &Vec3, n: &Vec3, eta_ratio: f64) -> Option<Vec3> {
    let cos_theta = (-uv).dot(n).min(1.0);
    let sin_theta_sq = 1.0 - cos_theta * cos_theta;
    if eta_ratio * eta_ratio * sin_theta_sq > 1.0 {
        return None;
    }
    let perp = eta_ratio * (uv + cos_theta * n);
    let parallel = -(1.0 - perp.norm_squared()).abs().sqrt() * n;
    Some(perp + parallel)
}

/// Schlick's approximation of Fresnel reflectance.
pub(crate) fn schlick(cosine: f64, refraction_index: f64) -> f64 {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

pub(crate) fn near_zero(v: &Vec3) -> bool {
    const EPS: f64 = 1e-8;
    v.x.abs() < EPS && v.y.abs() < EPS && v.z.abs() < EPS
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
