//! CPU rendering: sampling, tone mapping, and the frame type shared with hosts and sinks.

pub mod progressive;

use rand::Rng;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::foundation::core::{Canvas, Color, PixelColor, PixelPosition};
use crate::foundation::error::{RayframeError, RayframeResult};
use crate::foundation::math::{SampleRng, pixel_rng};
use crate::scene::Scene;
use crate::trace::{DEFAULT_MAX_DEPTH, trace};

/// A rendered frame as RGBA8 pixels.
///
/// Rows are stored top row first; alpha is opaque for traced pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// All-zero (transparent black) frame of the given size.
    pub fn blank(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0; canvas.rgba_len()],
        }
    }

    /// Frame dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// RGBA bytes at column `x`, row `row` (row 0 is the top of the image).
    pub fn pixel(&self, x: u32, row: u32) -> Option<[u8; 4]> {
        if x >= self.width || row >= self.height {
            return None;
        }
        let i = (row as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Image size and sampling parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderSettings {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Samples per pixel for a full render.
    pub samples_per_pixel: u32,
    /// Maximum path depth.
    pub max_depth: u32,
    /// Seed for every sample stream.
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1920 / 5,
            height: 1080 / 5,
            samples_per_pixel: 64,
            max_depth: DEFAULT_MAX_DEPTH,
            seed: 0,
        }
    }
}

impl RenderSettings {
    /// Reject empty images and zero sample counts.
    pub fn validate(&self) -> RayframeResult<()> {
        self.canvas().validate()?;
        if self.samples_per_pixel == 0 {
            return Err(RayframeError::validation("samples_per_pixel must be >= 1"));
        }
        Ok(())
    }

    /// Output dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Width / height.
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height.max(1))
    }
}

/// Threading controls for a render.
#[derive(Clone, Debug, Default)]
pub struct RenderThreading {
    /// Render rows in parallel when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

/// Samples a scene through a camera.
#[derive(Clone, Debug)]
pub struct Raytracer {
    camera: Camera,
    settings: RenderSettings,
}

impl Raytracer {
    /// Create a tracer; `settings` must be valid.
    pub fn new(camera: Camera, settings: RenderSettings) -> RayframeResult<Self> {
        settings.validate()?;
        Ok(Self { camera, settings })
    }

    /// Current camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Replace the camera.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Render settings.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// One jittered sample through pixel `pos`.
    pub fn sample_pixel(&self, scene: &Scene, pos: PixelPosition, rng: &mut SampleRng) -> Color {
        let w = f64::from(self.settings.width.saturating_sub(1).max(1));
        let h = f64::from(self.settings.height.saturating_sub(1).max(1));
        let s = (f64::from(pos.x) + rng.gen_range(0.0..1.0)) / w;
        let t = (f64::from(pos.y) + rng.gen_range(0.0..1.0)) / h;
        let ray = self.camera.emit_ray_at(s, t);
        trace(&ray, scene, self.settings.max_depth, rng)
    }

    /// Sum of `samples` samples for `pos`, drawn from the stream of `pass`.
    pub fn accumulate_pixel(
        &self,
        scene: &Scene,
        pos: PixelPosition,
        pass: u64,
        samples: u32,
    ) -> Color {
        let mut rng = pixel_rng(self.settings.seed, pos.x, pos.y, pass);
        let mut sum = Color::zeros();
        for _ in 0..samples {
            sum += self.sample_pixel(scene, pos, &mut rng);
        }
        sum
    }

    /// Render a full frame with `samples_per_pixel` samples per pixel.
    ///
    /// Parallel and sequential renders are byte-identical.
    #[tracing::instrument(
        skip_all,
        fields(width = self.settings.width, height = self.settings.height)
    )]
    pub fn render(&self, scene: &Scene, threading: &RenderThreading) -> RayframeResult<FrameRGBA> {
        let mut frame = FrameRGBA::blank(self.settings.canvas());
        let row_len = self.settings.width as usize * 4;
        let spp = self.settings.samples_per_pixel;

        let render_row = |(row, out): (usize, &mut [u8])| {
            let y = self.settings.height - 1 - row as u32;
            for (x, px) in out.chunks_exact_mut(4).enumerate() {
                let pos = PixelPosition { x: x as u32, y };
                let sum = self.accumulate_pixel(scene, pos, 0, spp);
                px.copy_from_slice(&PixelColor::from_linear(sum, spp).to_rgba());
            }
        };

        if threading.parallel {
            let pool = build_thread_pool(threading.threads)?;
            pool.install(|| {
                frame
                    .data
                    .par_chunks_mut(row_len)
                    .enumerate()
                    .for_each(render_row)
            });
        } else {
            frame.data.chunks_mut(row_len).enumerate().for_each(render_row);
        }

        tracing::debug!("frame rendered");
        Ok(frame)
    }
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> RayframeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(RayframeError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| RayframeError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/raytracer.rs"]
mod tests;
