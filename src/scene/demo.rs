use crate::foundation::core::Vec3;
use crate::foundation::error::RayframeResult;
use crate::geometry::sphere::Sphere;
use crate::material::Metal;
use crate::scene::Scene;

/// Built-in scene of the frame module: a mirror sphere resting on a mirror ground with a small
/// mirror sphere in front.
pub fn demo_scene() -> RayframeResult<Scene> {
    let chrome = || Box::new(Metal::new(Vec3::new(0.8, 0.8, 0.8), 0.0));

    let mut scene = Scene::new();
    scene.push(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, chrome())?);
    scene.push(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, chrome())?);
    scene.push(Sphere::new(Vec3::new(0.5, -0.4, -0.85), 0.1, chrome())?);
    Ok(scene)
}
