//! Progressive refinement: one sample per pixel per pass, visited in random order so that a
//! partially finished pass is spread evenly over the image.

use rand::seq::SliceRandom;

use crate::foundation::core::{Canvas, Color, PixelColor, PixelPosition};
use crate::foundation::error::{RayframeError, RayframeResult};
use crate::foundation::math::{SampleRng, pixel_rng};
use crate::render::{FrameRGBA, Raytracer, RenderSettings};
use crate::scene::Scene;

/// Every pixel of a canvas exactly once, in random order.
#[derive(Clone, Debug)]
pub struct PixelOrder {
    positions: Vec<PixelPosition>,
}

impl PixelOrder {
    /// Shuffle all positions of `canvas` with `rng`.
    pub fn shuffled(canvas: Canvas, rng: &mut SampleRng) -> Self {
        let mut positions: Vec<PixelPosition> = (0..canvas.height)
            .flat_map(|y| (0..canvas.width).map(move |x| PixelPosition { x, y }))
            .collect();
        positions.shuffle(rng);
        Self { positions }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Return `true` for an empty canvas.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions in visiting order.
    pub fn positions(&self) -> &[PixelPosition] {
        &self.positions
    }
}

/// Sample accumulator that refines an image across calls.
#[derive(Clone, Debug)]
pub struct ProgressiveRender {
    canvas: Canvas,
    seed: u64,
    accum: Vec<Color>,
    samples: Vec<u32>,
    order: PixelOrder,
    cursor: usize,
    pass: u64,
}

impl ProgressiveRender {
    /// Empty accumulator for the size and seed in `settings`.
    pub fn new(settings: &RenderSettings) -> RayframeResult<Self> {
        let canvas = settings.canvas();
        canvas.validate()?;
        let px = canvas.pixel_count();
        Ok(Self {
            canvas,
            seed: settings.seed,
            accum: vec![Color::zeros(); px],
            samples: vec![0; px],
            order: Self::order_for(canvas, settings.seed, 0),
            cursor: 0,
            pass: 0,
        })
    }

    fn order_for(canvas: Canvas, seed: u64, pass: u64) -> PixelOrder {
        let mut rng = pixel_rng(seed, u32::MAX, u32::MAX, pass);
        PixelOrder::shuffled(canvas, &mut rng)
    }

    /// Index of the pass currently being sampled.
    pub fn pass(&self) -> u64 {
        self.pass
    }

    /// Pixels already sampled in the current pass.
    pub fn pass_progress(&self) -> usize {
        self.cursor
    }

    /// Samples accumulated for `pos`.
    pub fn samples_at(&self, pos: PixelPosition) -> Option<u32> {
        self.index_of(pos).map(|i| self.samples[i])
    }

    fn index_of(&self, pos: PixelPosition) -> Option<usize> {
        if pos.x >= self.canvas.width || pos.y >= self.canvas.height {
            return None;
        }
        let row = (self.canvas.height - 1 - pos.y) as usize;
        Some(row * self.canvas.width as usize + pos.x as usize)
    }

    /// Take one more sample for the next `budget` pixels in the visiting order.
    ///
    /// Finishing a pass reshuffles the order and starts the next one. Returns the number of
    /// pixels sampled.
    pub fn step(
        &mut self,
        raytracer: &Raytracer,
        scene: &Scene,
        budget: usize,
    ) -> RayframeResult<usize> {
        if raytracer.settings().canvas() != self.canvas {
            return Err(RayframeError::render(format!(
                "progressive accumulator is {}x{} but the tracer renders {}x{}",
                self.canvas.width,
                self.canvas.height,
                raytracer.settings().width,
                raytracer.settings().height
            )));
        }

        let mut sampled = 0;
        for _ in 0..budget {
            if self.cursor == self.order.len() {
                self.pass += 1;
                self.cursor = 0;
                self.order = Self::order_for(self.canvas, self.seed, self.pass);
                tracing::trace!(pass = self.pass, "progressive pass started");
            }
            let pos = self.order.positions()[self.cursor];
            self.cursor += 1;
            let Some(i) = self.index_of(pos) else {
                continue;
            };
            self.accum[i] += raytracer.accumulate_pixel(scene, pos, self.pass, 1);
            self.samples[i] += 1;
            sampled += 1;
        }
        Ok(sampled)
    }

    /// Drop every accumulated sample, e.g. after the camera moved.
    pub fn invalidate(&mut self) {
        self.accum.fill(Color::zeros());
        self.samples.fill(0);
        self.pass = 0;
        self.cursor = 0;
        self.order = Self::order_for(self.canvas, self.seed, 0);
    }

    /// Write the current average into `out` as RGBA8, top row first. Unsampled pixels are black.
    pub fn write_rgba(&self, out: &mut [u8]) -> RayframeResult<()> {
        if out.len() != self.canvas.rgba_len() {
            return Err(RayframeError::render(format!(
                "output buffer holds {} bytes, expected {}",
                out.len(),
                self.canvas.rgba_len()
            )));
        }
        self.fill_rgba(out);
        Ok(())
    }

    fn fill_rgba(&self, out: &mut [u8]) {
        for ((px, sum), n) in out
            .chunks_exact_mut(4)
            .zip(&self.accum)
            .zip(&self.samples)
        {
            px.copy_from_slice(&PixelColor::from_linear(*sum, *n).to_rgba());
        }
    }

    /// Current average as a frame.
    pub fn frame(&self) -> FrameRGBA {
        let mut frame = FrameRGBA::blank(self.canvas);
        self.fill_rgba(&mut frame.data);
        frame
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/progressive.rs"]
mod tests;
