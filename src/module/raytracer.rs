use std::path::Path;

use crate::camera::{Camera, Navigation};
use crate::foundation::core::Canvas;
use crate::foundation::error::{RayframeError, RayframeResult};
use crate::module::{FrameModule, HEADER_BYTES, LinearMemory, install_panic_hook};
use crate::module::{memory_for_output, write_header};
use crate::render::progressive::ProgressiveRender;
use crate::render::{Raytracer, RenderSettings, RenderThreading};
use crate::scene::{CameraDef, Scene, SceneDef, demo_scene, generated_scene};

/// How [`RaytracerModule::render`] spends its time.
#[derive(Clone, Debug)]
pub enum RenderMode {
    /// Every call renders a complete frame with `samples_per_pixel` samples.
    Full {
        /// Row threading for the render.
        threading: RenderThreading,
    },
    /// Every call adds one sample to the next `budget` pixels and republishes the average.
    Progressive {
        /// Pixels sampled per call.
        budget: usize,
    },
}

impl Default for RenderMode {
    fn default() -> Self {
        Self::Full {
            threading: RenderThreading::default(),
        }
    }
}

/// Frame module backed by the path tracer.
pub struct RaytracerModule {
    raytracer: Raytracer,
    scene: Scene,
    mode: RenderMode,
    progressive: Option<ProgressiveRender>,
    memory: LinearMemory,
    output_offset: usize,
    grow_pages_per_render: u32,
    renders: u64,
}

impl RaytracerModule {
    /// Module rendering `scene` through `raytracer`.
    pub fn new(scene: Scene, raytracer: Raytracer, mode: RenderMode) -> RayframeResult<Self> {
        let settings = *raytracer.settings();
        let len = settings.canvas().checked_rgba_len()?;
        let progressive = match mode {
            RenderMode::Progressive { budget: 0 } => {
                return Err(RayframeError::validation(
                    "progressive budget must be >= 1 pixel per render",
                ));
            }
            RenderMode::Progressive { .. } => Some(ProgressiveRender::new(&settings)?),
            RenderMode::Full { .. } => None,
        };
        Ok(Self {
            raytracer,
            scene,
            mode,
            progressive,
            memory: memory_for_output(len)?,
            output_offset: HEADER_BYTES,
            grow_pages_per_render: 0,
            renders: 0,
        })
    }

    /// The built-in demo scene at the default size (384x216, 64 samples).
    pub fn demo(mode: RenderMode) -> RayframeResult<Self> {
        Self::demo_with_settings(RenderSettings::default(), mode)
    }

    /// The built-in demo scene with custom settings.
    pub fn demo_with_settings(settings: RenderSettings, mode: RenderMode) -> RayframeResult<Self> {
        settings.validate()?;
        let cam = CameraDef::default();
        let camera = Camera::look_at(
            cam.position.into(),
            cam.look_at.into(),
            cam.up.into(),
            cam.vfov_deg,
            settings.aspect(),
        )?;
        Self::new(demo_scene()?, Raytracer::new(camera, settings)?, mode)
    }

    /// Build a module from a scene description; textures resolve against `assets_root`.
    pub fn from_scene_def(
        def: &SceneDef,
        assets_root: &Path,
        mode: RenderMode,
    ) -> RayframeResult<Self> {
        let built = def.build(assets_root)?;
        Self::new(
            built.scene,
            Raytracer::new(built.camera, built.settings)?,
            mode,
        )
    }

    /// A Poisson-disk scene generated from `seed`, viewed from above and in front.
    pub fn generated(
        seed: u64,
        settings: RenderSettings,
        mode: RenderMode,
    ) -> RayframeResult<Self> {
        settings.validate()?;
        let generated = generated_scene(seed)?;
        let camera = generated.overview_camera(settings.aspect())?;
        tracing::debug!(
            seed,
            spheres = generated.centers.len(),
            target = generated.target,
            "generated scene"
        );
        Self::new(generated.scene, Raytracer::new(camera, settings)?, mode)
    }

    /// Grow memory by `pages` before every render, forcing hosts to re-derive their views.
    pub fn with_memory_growth(mut self, pages: u32) -> Self {
        self.grow_pages_per_render = pages;
        self
    }

    /// Frame dimensions.
    pub fn canvas(&self) -> Canvas {
        self.raytracer.settings().canvas()
    }

    /// Number of completed renders.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// Current camera.
    pub fn camera(&self) -> &Camera {
        self.raytracer.camera()
    }

    /// Replace the camera. Progressive samples taken with the old camera are discarded.
    pub fn set_camera(&mut self, camera: Camera) {
        self.raytracer.set_camera(camera);
        if let Some(p) = self.progressive.as_mut() {
            p.invalidate();
        }
    }

    /// Apply one interactive step for `dt_secs` seconds and install the resulting camera.
    pub fn navigate(&mut self, step: Navigation, fast: bool, dt_secs: f64) -> RayframeResult<()> {
        let camera = self.camera().navigated(step, fast, dt_secs)?;
        self.set_camera(camera);
        Ok(())
    }
}

impl FrameModule for RaytracerModule {
    fn init_panic_hook(&mut self) {
        install_panic_hook();
    }

    fn width(&self) -> u32 {
        self.raytracer.settings().width
    }

    fn height(&self) -> u32 {
        self.raytracer.settings().height
    }

    #[tracing::instrument(skip(self), fields(render = self.renders))]
    fn render(&mut self) -> RayframeResult<()> {
        if self.grow_pages_per_render > 0 {
            self.memory.grow(self.grow_pages_per_render)?;
        }

        let len = self.canvas().rgba_len();
        match &self.mode {
            RenderMode::Full { threading } => {
                let frame = self.raytracer.render(&self.scene, threading)?;
                self.memory.write(self.output_offset, &frame.data)?;
            }
            RenderMode::Progressive { budget } => {
                let progressive = self.progressive.as_mut().ok_or_else(|| {
                    RayframeError::render("progressive mode without an accumulator")
                })?;
                progressive.step(&self.raytracer, &self.scene, *budget)?;
                progressive.write_rgba(self.memory.slice_mut(self.output_offset, len)?)?;
            }
        }

        self.renders += 1;
        write_header(&mut self.memory, self.renders)?;
        tracing::debug!(pages = self.memory.pages(), "module render complete");
        Ok(())
    }

    fn output_buffer_pointer(&self) -> usize {
        self.output_offset
    }

    fn memory(&self) -> &LinearMemory {
        &self.memory
    }
}

impl std::fmt::Debug for RaytracerModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaytracerModule")
            .field("canvas", &self.canvas())
            .field("mode", &self.mode)
            .field("objects", &self.scene.len())
            .field("pages", &self.memory.pages())
            .field("renders", &self.renders)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/module/raytracer.rs"]
mod tests;
