use crate::foundation::error::{RayframeError, RayframeResult};

/// 3D vector in world space.
pub type Vec3 = nalgebra::Vector3<f64>;

/// Linear RGB color, nominally in `[0, 1]` per channel.
pub type Color = nalgebra::Vector3<f64>;

/// Index of a presented frame, strictly increasing per host.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create canvas dimensions without validation.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Reject empty canvases and canvases whose RGBA byte length overflows `usize`.
    pub fn validate(self) -> RayframeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RayframeError::validation(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        self.checked_rgba_len().map(|_| ())
    }

    /// Number of pixels.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Byte length of a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        self.pixel_count().saturating_mul(4)
    }

    pub(crate) fn checked_rgba_len(self) -> RayframeResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| {
                RayframeError::validation(format!(
                    "canvas {}x{} overflows the addressable RGBA length",
                    self.width, self.height
                ))
            })
    }
}

/// Pixel coordinate in camera space: `y == 0` is the bottom row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelPosition {
    /// Column, left to right.
    pub x: u32,
    /// Row, bottom to top.
    pub y: u32,
}

/// Display-ready 8-bit color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PixelColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl PixelColor {
    /// Opaque black.
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    /// Average `sum` over `samples`, clamp, gamma-correct (gamma 2) and quantize.
    ///
    /// `samples == 0` yields black.
    pub fn from_linear(sum: Color, samples: u32) -> Self {
        if samples == 0 {
            return Self::BLACK;
        }
        let scale = 1.0 / f64::from(samples);
        let c = (sum * scale).map(|c| {
            let c = if c.is_finite() { c.clamp(0.0, 1.0) } else { 0.0 };
            c.sqrt() * 255.0
        });
        Self {
            r: c.x as u8,
            g: c.y as u8,
            b: c.z as u8,
        }
    }

    /// RGBA bytes with opaque alpha.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

/// Convert a packed `0xRRGGBB` value into a linear color in `[0, 1]`.
pub fn color_from_hex(rgb: u32) -> Color {
    Color::new(
        f64::from((rgb >> 16) & 0xff) / 255.0,
        f64::from((rgb >> 8) & 0xff) / 255.0,
        f64::from(rgb & 0xff) / 255.0,
    )
}

/// Parse `#RRGGBB` (the `#` is optional, case-insensitive) into a linear color.
pub fn parse_hex_color(s: &str) -> RayframeResult<Color> {
    let s = s.trim();
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(RayframeError::validation(format!(
            "hex color must be #RRGGBB, got \"{s}\""
        )));
    }
    let rgb = u32::from_str_radix(hex, 16)
        .map_err(|_| RayframeError::validation(format!("invalid hex color \"{s}\"")))?;
    Ok(color_from_hex(rgb))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
