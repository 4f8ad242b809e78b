use super::*;
use crate::foundation::core::Vec3;
use crate::geometry::sphere::Sphere;
use crate::material::Lambertian;

fn small_settings() -> RenderSettings {
    RenderSettings {
        width: 24,
        height: 12,
        samples_per_pixel: 2,
        max_depth: 8,
        seed: 5,
    }
}

fn camera_for(settings: &RenderSettings) -> Camera {
    Camera::look_at(
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 1.0, 0.0),
        53.0,
        settings.aspect(),
    )
    .unwrap()
}

fn diffuse_scene() -> Scene {
    let mut scene = Scene::new();
    scene.push(
        Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Box::new(Lambertian::from_hex(0xcc3333)),
        )
        .unwrap(),
    );
    scene
}

#[test]
fn default_settings_match_module_size() {
    let s = RenderSettings::default();
    assert_eq!((s.width, s.height), (384, 216));
    assert_eq!(s.samples_per_pixel, 64);
    assert_eq!(s.max_depth, 50);
}

#[test]
fn settings_validation() {
    let mut s = small_settings();
    s.samples_per_pixel = 0;
    assert!(s.validate().is_err());
    let mut s = small_settings();
    s.height = 0;
    assert!(Raytracer::new(camera_for(&small_settings()), s).is_err());
}

#[test]
fn frame_has_expected_size_and_opaque_alpha() {
    let settings = small_settings();
    let rt = Raytracer::new(camera_for(&settings), settings).unwrap();
    let frame = rt
        .render(&diffuse_scene(), &RenderThreading::default())
        .unwrap();
    assert_eq!(frame.canvas(), settings.canvas());
    assert_eq!(frame.data.len(), 24 * 12 * 4);
    assert!(frame.data.chunks_exact(4).all(|px| px[3] == 0xff));
}

#[test]
fn renders_are_deterministic_and_parallel_matches_sequential() {
    let settings = small_settings();
    let rt = Raytracer::new(camera_for(&settings), settings).unwrap();
    let scene = diffuse_scene();

    let a = rt.render(&scene, &RenderThreading::default()).unwrap();
    let b = rt.render(&scene, &RenderThreading::default()).unwrap();
    let par = rt
        .render(
            &scene,
            &RenderThreading {
                parallel: true,
                threads: Some(3),
            },
        )
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(a, par);
}

#[test]
fn zero_threads_is_rejected() {
    let settings = small_settings();
    let rt = Raytracer::new(camera_for(&settings), settings).unwrap();
    let err = rt
        .render(
            &diffuse_scene(),
            &RenderThreading {
                parallel: true,
                threads: Some(0),
            },
        )
        .unwrap_err();
    assert!(err.to_string().contains("threads"));
}

#[test]
fn top_row_sees_sky_and_center_sees_sphere() {
    let settings = small_settings();
    let rt = Raytracer::new(camera_for(&settings), settings).unwrap();
    let frame = rt
        .render(&diffuse_scene(), &RenderThreading::default())
        .unwrap();

    // Top-left corner looks up into the gradient: bluish, blue channel dominates red.
    let sky = frame.pixel(0, 0).unwrap();
    assert!(sky[2] >= sky[0]);

    // Center pixel hits the red diffuse sphere: red dominates blue.
    let center = frame.pixel(12, 6).unwrap();
    assert!(center[0] > center[2], "center pixel {center:?}");
}

#[test]
fn pixel_accessor_bounds() {
    let f = FrameRGBA::blank(Canvas::new(2, 2));
    assert_eq!(f.pixel(1, 1), Some([0, 0, 0, 0]));
    assert_eq!(f.pixel(2, 0), None);
}
