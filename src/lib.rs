//! rayframe is a CPU path tracer packaged as a fixed-size RGBA frame module.
//!
//! A frame module owns a flat linear memory, renders into it on request, and exposes the byte
//! offset of its output buffer. A host loads the module, copies each rendered frame out of memory
//! and paints it into a display sink:
//!
//! - Build a [`RaytracerModule`] from the demo scene or a [`SceneDef`]
//! - Load it into a [`FrameHost`] together with a [`FrameSink`]
//! - Call [`FrameHost::draw_frame`] once per displayed frame
//!
//! On `wasm32` the same module contract is exported through `wasm-bindgen` so a browser page can
//! play the host role.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod geometry;

/// Look-at pinhole camera.
pub mod camera;
pub mod host;
pub mod material;
pub mod module;
pub mod render;
pub mod scene;
pub mod sink;
/// Path tracing kernel.
pub mod trace;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use crate::foundation::core::{
    Canvas, Color, FrameIndex, PixelColor, PixelPosition, Vec3, color_from_hex, parse_hex_color,
};
pub use crate::foundation::error::{RayframeError, RayframeResult};
pub use crate::foundation::math::SampleRng;
pub use crate::geometry::hit::Hit;
pub use crate::geometry::ray::{Ray, T_MAX, T_MIN};
pub use crate::geometry::shape::Shape;
pub use crate::geometry::sphere::Sphere;

pub use crate::camera::{ArrowKeys, Camera, Navigation};
pub use crate::host::FrameHost;
pub use crate::material::{Dielectric, Lambertian, Material, Metal, Scatter, Texture};
pub use crate::module::{
    CheckerboardModule, FrameModule, LinearMemory, PAGE_SIZE, RaytracerModule, RenderMode,
};
pub use crate::render::progressive::{PixelOrder, ProgressiveRender};
pub use crate::render::{FrameRGBA, Raytracer, RenderSettings, RenderThreading};
pub use crate::scene::{GeneratedScene, Scene, SceneDef, demo_scene, generated_scene};
pub use crate::sink::{FrameSink, InMemorySink, PngSink, PpmSink, SinkConfig};
#[cfg(feature = "window")]
pub use crate::sink::WindowSink;
