use super::*;
use crate::foundation::core::Vec3;
use crate::geometry::sphere::Sphere;
use crate::material::{Lambertian, Metal};

fn sphere(z: f64, radius: f64) -> Sphere {
    Sphere::new(
        Vec3::new(0.0, 0.0, z),
        radius,
        Box::new(Lambertian::new(Vec3::new(0.5, 0.5, 0.5))),
    )
    .unwrap()
}

#[test]
fn empty_scene_never_hits() {
    let scene = Scene::new();
    assert!(scene.is_empty());
    let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
    assert!(scene.closest_hit(&ray).is_none());
}

#[test]
fn nearest_shape_wins_regardless_of_order() {
    let mut scene = Scene::new();
    scene.push(sphere(-10.0, 1.0));
    scene.push(sphere(-4.0, 1.0));
    scene.push(sphere(-7.0, 1.0));
    assert_eq!(scene.len(), 3);

    let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
    let hit = scene.closest_hit(&ray).unwrap();
    assert!((hit.distance - 3.0).abs() < 1e-9);
}

#[test]
fn ties_keep_the_first_shape() {
    let mut scene = Scene::new();
    scene.push(sphere(-4.0, 1.0));
    scene.push(
        Sphere::new(
            Vec3::new(0.0, 0.0, -4.0),
            1.0,
            Box::new(Metal::new(Vec3::new(0.8, 0.8, 0.8), 0.0)),
        )
        .unwrap(),
    );
    let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
    let hit = scene.closest_hit(&ray).unwrap();
    assert!(std::ptr::addr_eq(
        scene.objects[0].material(),
        hit.material()
    ));
}

#[test]
fn demo_scene_has_three_spheres_in_front_of_the_default_camera() {
    let scene = demo_scene().unwrap();
    assert_eq!(scene.len(), 3);

    let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
    let hit = scene.closest_hit(&ray).unwrap();
    assert!((hit.distance - 1.5).abs() < 1e-9);

    let down = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, -1.0, 0.0));
    let ground = scene.closest_hit(&down).unwrap();
    assert!(ground.position.y < -0.49);
}

#[test]
fn boxed_and_collected_scenes_behave_like_pushed_ones() {
    let mut pushed = Scene::new();
    pushed.push_boxed(Box::new(sphere(-4.0, 1.0)));
    pushed.push_boxed(Box::new(sphere(-8.0, 1.0)));

    let collected: Scene = [sphere(-8.0, 1.0), sphere(-4.0, 1.0)]
        .into_iter()
        .map(|s| Box::new(s) as Box<dyn Shape>)
        .collect();

    let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
    for scene in [&pushed, &collected] {
        assert_eq!(scene.len(), 2);
        let hit = scene.closest_hit(&ray).unwrap();
        assert!((hit.distance - 3.0).abs() < 1e-9);
    }
}
