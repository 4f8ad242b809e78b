use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::foundation::core::{Color, Vec3, parse_hex_color};
use crate::foundation::error::{RayframeError, RayframeResult};
use crate::geometry::sphere::Sphere;
use crate::material::{Dielectric, Lambertian, Material, Metal, Texture};
use crate::render::RenderSettings;
use crate::scene::Scene;

/// JSON-facing scene description.
///
/// ```json
/// {
///   "camera": { "position": [0, 0, 1], "look_at": [0, 0, -1], "vfov_deg": 40 },
///   "render": { "width": 320, "height": 180, "samples_per_pixel": 16 },
///   "objects": [
///     { "sphere": { "center": [0, 0, -1], "radius": 0.5,
///                   "material": { "metal": { "albedo": "#cccccc", "fuzz": 0.1 } } } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDef {
    /// Camera placement.
    #[serde(default)]
    pub camera: CameraDef,
    /// Render settings; unset fields fall back to [`RenderSettings::default`].
    #[serde(default)]
    pub render: RenderDef,
    /// Scene objects in intersection order.
    #[serde(default)]
    pub objects: Vec<ObjectDef>,
}

/// Camera placement. The aspect ratio is derived from the render size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraDef {
    /// Eye position.
    #[serde(default = "default_position")]
    pub position: [f64; 3],
    /// Point the camera looks at.
    #[serde(default = "default_look_at")]
    pub look_at: [f64; 3],
    /// World up direction.
    #[serde(default = "default_up")]
    pub up: [f64; 3],
    /// Vertical field of view in degrees.
    #[serde(default = "default_vfov_deg")]
    pub vfov_deg: f64,
}

impl Default for CameraDef {
    fn default() -> Self {
        Self {
            position: default_position(),
            look_at: default_look_at(),
            up: default_up(),
            vfov_deg: default_vfov_deg(),
        }
    }
}

fn default_position() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}

fn default_look_at() -> [f64; 3] {
    [0.0, 0.0, -1.0]
}

fn default_up() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}

// Viewport height 2 at focal distance 2.
fn default_vfov_deg() -> f64 {
    2.0 * 0.5_f64.atan().to_degrees()
}

/// Optional overrides for [`RenderSettings`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderDef {
    /// Output width in pixels.
    pub width: Option<u32>,
    /// Output height in pixels.
    pub height: Option<u32>,
    /// Samples per pixel for a full render.
    pub samples_per_pixel: Option<u32>,
    /// Maximum path depth.
    pub max_depth: Option<u32>,
    /// Sampling seed.
    pub seed: Option<u64>,
}

impl RenderDef {
    /// Apply the overrides on top of `base`.
    pub fn apply(&self, base: RenderSettings) -> RenderSettings {
        RenderSettings {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            samples_per_pixel: self.samples_per_pixel.unwrap_or(base.samples_per_pixel),
            max_depth: self.max_depth.unwrap_or(base.max_depth),
            seed: self.seed.unwrap_or(base.seed),
        }
    }
}

/// One scene object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectDef {
    /// A sphere.
    Sphere(SphereDef),
}

/// Sphere description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SphereDef {
    /// Center point.
    pub center: [f64; 3],
    /// Radius, > 0.
    pub radius: f64,
    /// Surface material.
    pub material: MaterialDef,
}

/// Material description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialDef {
    /// Diffuse surface.
    Lambertian {
        /// Reflectance.
        albedo: ColorDef,
    },
    /// Specular surface.
    Metal {
        /// Reflectance.
        albedo: ColorDef,
        /// Roughness in `[0, 1]`.
        #[serde(default)]
        fuzz: f64,
    },
    /// Refractive surface.
    Dielectric {
        /// Tint.
        #[serde(default = "ColorDef::white")]
        albedo: ColorDef,
        /// Index of refraction.
        refraction_index: f64,
    },
    /// Image-mapped surface.
    Texture {
        /// Image path, relative to the scene file.
        path: PathBuf,
        /// Repetitions across the surface.
        #[serde(default = "one")]
        scale: f64,
    },
}

fn one() -> f64 {
    1.0
}

/// Linear RGB color written as `"#RRGGBB"` or `[r, g, b]` with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorDef(pub [f64; 3]);

impl ColorDef {
    fn white() -> Self {
        Self([1.0, 1.0, 1.0])
    }

    /// Convert to a linear color.
    pub fn to_color(self) -> Color {
        Color::new(self.0[0], self.0[1], self.0[2])
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr([f64; 3]),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => {
                let c = parse_hex_color(&s).map_err(serde::de::Error::custom)?;
                Ok(Self([c.x, c.y, c.z]))
            }
            Repr::Arr(v) => Ok(Self(v)),
        }
    }
}

/// Everything needed to render a scene description.
#[derive(Debug)]
pub struct BuiltScene {
    /// Shapes with loaded materials.
    pub scene: Scene,
    /// Camera with the aspect ratio of `settings`.
    pub camera: Camera,
    /// Effective render settings.
    pub settings: RenderSettings,
}

impl SceneDef {
    /// Parse a scene description from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> RayframeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| RayframeError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene description from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> RayframeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RayframeError::scene(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Effective render settings.
    pub fn settings(&self) -> RenderSettings {
        self.render.apply(RenderSettings::default())
    }

    /// Check every value without touching the filesystem.
    pub fn validate(&self) -> RayframeResult<()> {
        let settings = self.settings();
        settings.validate()?;
        self.camera(&settings)?;
        for (i, obj) in self.objects.iter().enumerate() {
            let ObjectDef::Sphere(s) = obj;
            if !(s.radius.is_finite() && s.radius > 0.0) {
                return Err(RayframeError::scene(format!(
                    "objects[{i}]: sphere radius must be finite and > 0, got {}",
                    s.radius
                )));
            }
            match &s.material {
                MaterialDef::Dielectric {
                    refraction_index, ..
                } if !(refraction_index.is_finite() && *refraction_index > 0.0) => {
                    return Err(RayframeError::scene(format!(
                        "objects[{i}]: refraction_index must be finite and > 0"
                    )));
                }
                MaterialDef::Texture { scale, .. } if !(scale.is_finite() && *scale > 0.0) => {
                    return Err(RayframeError::scene(format!(
                        "objects[{i}]: texture scale must be finite and > 0"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Validate, load textures relative to `assets_root`, and build the runtime scene.
    #[tracing::instrument(skip(self), fields(objects = self.objects.len()))]
    pub fn build(&self, assets_root: &Path) -> RayframeResult<BuiltScene> {
        self.validate()?;
        let settings = self.settings();
        let camera = self.camera(&settings)?;

        let mut scene = Scene::new();
        for obj in &self.objects {
            let ObjectDef::Sphere(s) = obj;
            let material = build_material(&s.material, assets_root)?;
            scene.push(Sphere::new(vec3(s.center), s.radius, material)?);
        }

        Ok(BuiltScene {
            scene,
            camera,
            settings,
        })
    }

    fn camera(&self, settings: &RenderSettings) -> RayframeResult<Camera> {
        Camera::look_at(
            vec3(self.camera.position),
            vec3(self.camera.look_at),
            vec3(self.camera.up),
            self.camera.vfov_deg,
            settings.aspect(),
        )
    }
}

fn build_material(def: &MaterialDef, assets_root: &Path) -> RayframeResult<Box<dyn Material>> {
    Ok(match def {
        MaterialDef::Lambertian { albedo } => Box::new(Lambertian::new(albedo.to_color())),
        MaterialDef::Metal { albedo, fuzz } => Box::new(Metal::new(albedo.to_color(), *fuzz)),
        MaterialDef::Dielectric {
            albedo,
            refraction_index,
        } => Box::new(Dielectric::new(albedo.to_color(), *refraction_index)),
        MaterialDef::Texture { path, scale } => {
            Box::new(Texture::load(&assets_root.join(path), *scale)?)
        }
    })
}

fn vec3(v: [f64; 3]) -> Vec3 {
    Vec3::new(v[0], v[1], v[2])
}

#[cfg(test)]
#[path = "../../tests/unit/scene/description.rs"]
mod tests;
