use crate::foundation::core::Vec3;

/// Nearest accepted hit distance; avoids self-intersection ("shadow acne").
pub const T_MIN: f64 = 0.001;
/// Farthest accepted hit distance.
pub const T_MAX: f64 = 100_000.0;

/// Half-line `origin + t * direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Create a ray. `direction` does not need to be normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Ray origin.
    pub fn origin(&self) -> &Vec3 {
        &self.origin
    }

    /// Ray direction (not necessarily unit length).
    pub fn direction(&self) -> &Vec3 {
        &self.direction
    }

    /// Point at parameter `t`.
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}
