use super::*;
use crate::camera::Camera;
use crate::foundation::core::Vec3;
use std::collections::HashSet;

fn settings() -> RenderSettings {
    RenderSettings {
        width: 8,
        height: 6,
        samples_per_pixel: 1,
        max_depth: 4,
        seed: 11,
    }
}

fn tracer(s: RenderSettings) -> Raytracer {
    let cam = Camera::look_at(
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 1.0, 0.0),
        60.0,
        s.aspect(),
    )
    .unwrap();
    Raytracer::new(cam, s).unwrap()
}

#[test]
fn pixel_order_visits_every_pixel_once() {
    let mut rng = pixel_rng(1, 0, 0, 0);
    let order = PixelOrder::shuffled(Canvas::new(7, 5), &mut rng);
    assert_eq!(order.len(), 35);
    let unique: HashSet<_> = order.positions().iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(unique.len(), 35);
    assert!(order.positions().iter().all(|p| p.x < 7 && p.y < 5));
}

#[test]
fn partial_pass_leaves_unsampled_pixels_black() {
    let s = settings();
    let rt = tracer(s);
    let scene = Scene::new();
    let mut p = ProgressiveRender::new(&s).unwrap();

    assert_eq!(p.step(&rt, &scene, 10).unwrap(), 10);
    assert_eq!(p.pass(), 0);
    assert_eq!(p.pass_progress(), 10);

    let frame = p.frame();
    let black = frame
        .data
        .chunks_exact(4)
        .filter(|px| px[..3] == [0, 0, 0])
        .count();
    // Sky is never black, so exactly the unsampled pixels are.
    assert_eq!(black, 48 - 10);
}

#[test]
fn passes_wrap_and_accumulate_samples() {
    let s = settings();
    let rt = tracer(s);
    let scene = Scene::new();
    let mut p = ProgressiveRender::new(&s).unwrap();

    p.step(&rt, &scene, 48 * 2 + 5).unwrap();
    assert_eq!(p.pass(), 2);
    assert_eq!(p.pass_progress(), 5);

    let total: u32 = (0..6)
        .flat_map(|y| (0..8).map(move |x| PixelPosition { x, y }))
        .map(|pos| p.samples_at(pos).unwrap())
        .sum();
    assert_eq!(total, 48 * 2 + 5);
    assert_eq!(p.samples_at(PixelPosition { x: 8, y: 0 }), None);
}

#[test]
fn invalidate_resets_everything() {
    let s = settings();
    let rt = tracer(s);
    let scene = Scene::new();
    let mut p = ProgressiveRender::new(&s).unwrap();
    p.step(&rt, &scene, 60).unwrap();
    p.invalidate();
    assert_eq!(p.pass(), 0);
    assert_eq!(p.pass_progress(), 0);
    assert_eq!(p.samples_at(PixelPosition { x: 0, y: 0 }), Some(0));
    assert!(p.frame().data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn rejects_mismatched_tracer_and_buffer() {
    let s = settings();
    let mut p = ProgressiveRender::new(&s).unwrap();
    let other = RenderSettings {
        width: 4,
        ..s
    };
    assert!(p.step(&tracer(other), &Scene::new(), 1).is_err());

    let mut short = vec![0u8; 3];
    assert!(p.write_rgba(&mut short).is_err());
}

#[test]
fn same_seed_gives_same_progression() {
    let s = settings();
    let rt = tracer(s);
    let scene = Scene::new();
    let mut a = ProgressiveRender::new(&s).unwrap();
    let mut b = ProgressiveRender::new(&s).unwrap();
    a.step(&rt, &scene, 70).unwrap();
    b.step(&rt, &scene, 30).unwrap();
    b.step(&rt, &scene, 40).unwrap();
    assert_eq!(a.frame(), b.frame());
}
