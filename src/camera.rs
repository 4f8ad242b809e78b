use crate::foundation::core::Vec3;
use crate::foundation::error::{RayframeError, RayframeResult};
use crate::geometry::ray::Ray;

/// Pitch limit that keeps the view direction away from the up axis.
const MAX_PITCH_DEG: f64 = 89.0;

/// Forward speed in world units per second (normal, fast).
const FORWARD_SPEED: (f64, f64) = (1.0, 5.0);
/// Backward speed in world units per second (normal, fast).
const BACKWARD_SPEED: (f64, f64) = (1.0, 3.0);
/// Turn rate in radians per second (normal, fast).
const TURN_RATE: (f64, f64) = (0.75, 1.5);

/// One interactive camera step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Move along the view direction.
    Forward,
    /// Move against the view direction.
    Backward,
    /// Yaw to the left.
    TurnLeft,
    /// Yaw to the right.
    TurnRight,
}

/// Arrow keys and Shift as held during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArrowKeys {
    /// Up arrow.
    pub up: bool,
    /// Down arrow.
    pub down: bool,
    /// Left arrow.
    pub left: bool,
    /// Right arrow.
    pub right: bool,
    /// Either Shift key; speeds every step up.
    pub shift: bool,
}

impl ArrowKeys {
    /// Steps for the held keys. Up wins over Down and Left wins over Right; moving and turning
    /// combine.
    pub fn navigation(&self) -> Vec<Navigation> {
        let mut steps = Vec::with_capacity(2);
        if self.up {
            steps.push(Navigation::Forward);
        } else if self.down {
            steps.push(Navigation::Backward);
        }
        if self.left {
            steps.push(Navigation::TurnLeft);
        } else if self.right {
            steps.push(Navigation::TurnRight);
        }
        steps
    }

    /// Pack into one byte, for sharing across threads.
    pub fn to_bits(self) -> u8 {
        u8::from(self.up)
            | (u8::from(self.down) << 1)
            | (u8::from(self.left) << 2)
            | (u8::from(self.right) << 3)
            | (u8::from(self.shift) << 4)
    }

    /// Inverse of [`ArrowKeys::to_bits`].
    pub fn from_bits(bits: u8) -> Self {
        Self {
            up: bits & 1 != 0,
            down: bits & (1 << 1) != 0,
            left: bits & (1 << 2) != 0,
            right: bits & (1 << 3) != 0,
            shift: bits & (1 << 4) != 0,
        }
    }
}

/// Look-at pinhole camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    origin: Vec3,
    target: Vec3,
    up: Vec3,
    vfov_deg: f64,
    aspect: f64,

    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Build a camera at `origin` looking at `target`.
    ///
    /// `vfov_deg` is the vertical field of view, `aspect` is width / height.
    pub fn look_at(
        origin: Vec3,
        target: Vec3,
        up: Vec3,
        vfov_deg: f64,
        aspect: f64,
    ) -> RayframeResult<Self> {
        if !(vfov_deg > 0.0 && vfov_deg < 180.0) {
            return Err(RayframeError::validation(format!(
                "camera vfov_deg must be in (0, 180), got {vfov_deg}"
            )));
        }
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(RayframeError::validation(format!(
                "camera aspect must be finite and > 0, got {aspect}"
            )));
        }
        let back = origin - target;
        if back.norm_squared() == 0.0 || !back.norm_squared().is_finite() {
            return Err(RayframeError::validation(
                "camera origin and target must be distinct finite points",
            ));
        }
        let w = back.normalize();
        let side = up.cross(&w);
        if side.norm_squared() < 1e-12 {
            return Err(RayframeError::validation(
                "camera up vector must not be parallel to the view direction",
            ));
        }
        let u = side.normalize();
        let v = w.cross(&u);

        let viewport_height = 2.0 * (vfov_deg.to_radians() / 2.0).tan();
        let viewport_width = aspect * viewport_height;
        let horizontal = viewport_width * u;
        let vertical = viewport_height * v;

        Ok(Self {
            origin,
            target,
            up,
            vfov_deg,
            aspect,
            lower_left_corner: origin - horizontal / 2.0 - vertical / 2.0 - w,
            horizontal,
            vertical,
        })
    }

    /// Camera position.
    pub fn origin(&self) -> &Vec3 {
        &self.origin
    }

    /// Point the camera looks at.
    pub fn target(&self) -> &Vec3 {
        &self.target
    }

    /// Vertical field of view in degrees.
    pub fn vfov_deg(&self) -> f64 {
        self.vfov_deg
    }

    /// Viewport aspect ratio (width / height).
    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    /// Ray through viewport coordinates `(s, t)`, with `(0, 0)` at the lower-left corner.
    pub fn emit_ray_at(&self, s: f64, t: f64) -> Ray {
        Ray::new(
            self.origin,
            self.lower_left_corner + self.horizontal * s + self.vertical * t - self.origin,
        )
    }

    /// Same camera with a different aspect ratio.
    pub fn with_aspect(&self, aspect: f64) -> RayframeResult<Self> {
        Self::look_at(self.origin, self.target, self.up, self.vfov_deg, aspect)
    }

    /// Translate origin and target by `delta`.
    pub fn moved(&self, delta: Vec3) -> RayframeResult<Self> {
        Self::look_at(
            self.origin + delta,
            self.target + delta,
            self.up,
            self.vfov_deg,
            self.aspect,
        )
    }

    /// Turn the view direction by `yaw_deg` around `up` and `pitch_deg` around the camera's right
    /// axis. The distance to the target is preserved.
    pub fn rotated(&self, yaw_deg: f64, pitch_deg: f64) -> RayframeResult<Self> {
        let up = self.up.normalize();
        let forward = self.target - self.origin;
        let distance = forward.norm();
        let dir = forward / distance;

        let current_pitch = dir.dot(&up).clamp(-1.0, 1.0).asin().to_degrees();
        let pitch =
            (current_pitch + pitch_deg).clamp(-MAX_PITCH_DEG, MAX_PITCH_DEG) - current_pitch;

        let yawed = rotate_around(&dir, &up, yaw_deg.to_radians());
        let right = yawed.cross(&up).normalize();
        let turned = rotate_around(&yawed, &right, pitch.to_radians());

        Self::look_at(
            self.origin,
            self.origin + turned * distance,
            self.up,
            self.vfov_deg,
            self.aspect,
        )
    }

    /// Apply `step` for `dt_secs` seconds; `fast` selects the Shift speeds.
    pub fn navigated(&self, step: Navigation, fast: bool, dt_secs: f64) -> RayframeResult<Self> {
        if !(dt_secs.is_finite() && dt_secs >= 0.0) {
            return Err(RayframeError::validation(format!(
                "navigation time step must be finite and >= 0, got {dt_secs}"
            )));
        }
        let pick = |(normal, shifted): (f64, f64)| if fast { shifted } else { normal };
        let forward = (self.target - self.origin).normalize();
        match step {
            Navigation::Forward => self.moved(forward * pick(FORWARD_SPEED) * dt_secs),
            Navigation::Backward => self.moved(-forward * pick(BACKWARD_SPEED) * dt_secs),
            Navigation::TurnLeft => self.rotated((pick(TURN_RATE) * dt_secs).to_degrees(), 0.0),
            Navigation::TurnRight => self.rotated(-(pick(TURN_RATE) * dt_secs).to_degrees(), 0.0),
        }
    }
}

/// Rodrigues rotation of `v` around unit `axis` by `angle` radians.
fn rotate_around(v: &Vec3, axis: &Vec3, angle: f64) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    v * cos + axis.cross(v) * sin + axis * axis.dot(v) * (1.0 - cos)
}

#[cfg(test)]
#[path = "../tests/unit/camera.rs"]
mod tests;
