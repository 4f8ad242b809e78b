use super::*;
use crate::foundation::core::Vec3;
use crate::foundation::math::pixel_rng;
use crate::geometry::sphere::Sphere;
use crate::material::{Lambertian, Metal, Texture};

fn down() -> Ray {
    Ray::new(Vec3::zeros(), Vec3::new(0.0, -1.0, 0.0))
}

#[test]
fn sky_is_white_at_horizon_bottom_and_blue_at_zenith() {
    assert_eq!(sky_color(&down()), Color::new(1.0, 1.0, 1.0));
    let up = Ray::new(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(sky_color(&up), Color::new(0.5, 0.7, 1.0));
}

#[test]
fn empty_scene_returns_sky() {
    let mut rng = pixel_rng(0, 0, 0, 0);
    let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.3, -1.0));
    assert_eq!(trace(&ray, &Scene::new(), 50, &mut rng), sky_color(&ray));
}

#[test]
fn zero_depth_returns_sky_even_when_blocked() {
    let mut scene = Scene::new();
    scene.push(
        Sphere::new(
            Vec3::new(0.0, -2.0, 0.0),
            1.0,
            Box::new(Lambertian::new(Vec3::new(0.5, 0.5, 0.5))),
        )
        .unwrap(),
    );
    let mut rng = pixel_rng(0, 0, 0, 0);
    assert_eq!(trace(&down(), &scene, 0, &mut rng), sky_color(&down()));
}

#[test]
fn mirror_bounce_attenuates_reflected_sky() {
    let mut scene = Scene::new();
    scene.push(
        Sphere::new(
            Vec3::new(0.0, -2.0, 0.0),
            1.0,
            Box::new(Metal::new(Vec3::new(0.5, 0.5, 0.5), 0.0)),
        )
        .unwrap(),
    );
    let mut rng = pixel_rng(0, 0, 0, 0);
    let c = trace(&down(), &scene, 50, &mut rng);
    // Reflected straight up into the zenith color, halved.
    assert!((c - Color::new(0.25, 0.35, 0.5)).norm() < 1e-9);
}

#[test]
fn emitting_surface_terminates_the_path() {
    let mut img = image::RgbImage::new(1, 1);
    img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
    let mut scene = Scene::new();
    scene.push(
        Sphere::new(
            Vec3::new(0.0, -2.0, 0.0),
            1.0,
            Box::new(Texture::from_image(img, 1.0).unwrap()),
        )
        .unwrap(),
    );
    let mut rng = pixel_rng(0, 0, 0, 0);
    assert_eq!(trace(&down(), &scene, 5, &mut rng), Color::new(1.0, 0.0, 0.0));
}
